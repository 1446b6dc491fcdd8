pub mod codegen;
pub mod error;
pub mod export;
pub mod parse;
pub mod validate;
pub mod wasm;
