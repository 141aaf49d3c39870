pub mod algorithms;
pub mod encrypt;
pub mod health;
pub mod run;
pub mod sample;
