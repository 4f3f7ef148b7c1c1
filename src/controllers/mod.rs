pub mod dialog;
pub mod health;
