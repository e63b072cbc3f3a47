pub mod config;
pub mod event;
pub mod execute;
pub mod output;
pub mod plan;
pub mod run;

pub mod github {
    pub mod classify;
    pub mod client;
    pub mod history;
}
