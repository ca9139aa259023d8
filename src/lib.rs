pub mod config;
pub mod consts;
pub mod event;
pub mod lookup;
pub mod response;
pub mod skill;
pub mod telemetry;
