use crate::rpc::{Invocation, RpcResult};

/// An outbound or decoded call, identified by the runtime's correlation id.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub id: i64,
    pub invocation: Invocation,
}

impl Request {
    pub fn new(id: i64, invocation: Invocation) -> Self {
        Self { id, invocation }
    }
}

/// The answer to the [`Request`] with the same `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub id: i64,
    pub result: RpcResult,
}

impl Response {
    pub fn new(id: i64, result: RpcResult) -> Self {
        Self { id, result }
    }
}
