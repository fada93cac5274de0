pub mod history;
pub mod quote;
pub mod run;
pub mod status;
