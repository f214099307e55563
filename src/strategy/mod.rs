pub mod chain;
pub mod filter;
pub mod group;
pub mod ignore;
pub mod panic;
pub mod select;
