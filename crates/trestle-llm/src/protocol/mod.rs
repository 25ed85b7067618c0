//! Wire formats spoken to the remote endpoint

pub mod openai;
