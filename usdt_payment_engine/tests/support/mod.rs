// Each test binary only uses part of the support code.
#![allow(dead_code)]

pub mod fake_engine;
pub mod fixtures;
pub mod prepare_env;
