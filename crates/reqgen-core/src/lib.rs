pub mod compile;
pub mod config;
pub mod error;
pub mod ir;
pub mod literal;
pub mod naming;
pub mod openapi;
pub mod parser;
pub mod pipeline;
pub mod preset;
pub mod transform;
pub mod traverse;
pub mod typemap;
