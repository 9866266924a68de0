//! External discovery tools
//!
//! Tool definitions with placeholder substitution, and the invokers that run them.

pub mod definition;
pub mod invoker;
#[cfg(test)]
pub mod scripted;

pub use definition::{DOMAIN_PLACEHOLDER, Placeholders, RESOLVERS_PLACEHOLDER, Tool, WORDLIST_PLACEHOLDER};
pub use invoker::{InvokerPolicy, ProcessInvoker, ToolInvoker};
#[cfg(test)]
pub use scripted::ScriptedInvoker;
