pub mod client;
pub mod extractor;
pub mod poll_loop;
pub mod validator;
