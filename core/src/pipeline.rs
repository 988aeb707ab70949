//! Configuration, registry and composition of serializer pipelines.

mod builder;
mod config;
mod config_option;
mod factory;
mod registry;
mod selection;


pub use self::{builder::*, config::*, config_option::*, factory::*, registry::*, selection::*};
