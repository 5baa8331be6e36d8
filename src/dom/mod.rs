pub mod node;

pub use node::{Element, ElementRef, Node};
