pub mod client;

pub use client::{strip_code_fence, ChatClient};
