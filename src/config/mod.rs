//! Configuration for the demo figures

mod demos;

pub use demos::{
    DemoConfig, DemoKind, GrayscaleConfig, PulseConfig, SineConfig, SpectrumConfig,
};
