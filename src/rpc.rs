mod rpc_invocation;
mod rpc_request_response;
mod rpc_result;

pub use rpc_invocation::Invocation;
pub use rpc_request_response::{Request, Response};
pub use rpc_result::{RpcException, RpcResult};
