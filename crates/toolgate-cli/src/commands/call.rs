//! `toolgate call` command: a one-shot line-transport client.

use clap::Args;
use serde_json::{Map, Value};
use tokio::net::TcpStream;

use toolgate_config::GateConfig;
use toolgate_protocol::{RequestId, RpcRequest};
use toolgate_transport_stream::LineTransport;

/// Send one request to a running tcp gateway and print the reply.
#[derive(Debug, Args)]
pub struct CallArgs {
    /// Gateway address (defaults to `server.listen`).
    #[arg(long)]
    pub addr: Option<String>,
    /// Method name, e.g. `tools.list` or `tools.call`.
    pub method: String,
    /// Params object as JSON, e.g. '{"name":"echo","args":{"x":5}}'.
    pub params: Option<String>,
}

/// Executes the call command.
pub async fn execute(args: &CallArgs, config: &GateConfig) -> anyhow::Result<()> {
    let addr = args.addr.as_deref().unwrap_or(&config.server.listen);
    let params = parse_params(args.params.as_deref())?;
    let request = RpcRequest::new(Some(RequestId::from(1)), &args.method, params);
    let frame = serde_json::to_string(&request)?;

    let stream = TcpStream::connect(addr)
        .await
        .map_err(|e| anyhow::anyhow!("cannot connect to {addr}: {e}"))?;
    let (reader, writer) = stream.into_split();
    let mut transport = LineTransport::new(reader, writer);

    tracing::debug!(%addr, method = %args.method, "sending request");
    transport.write_line(&frame).await?;
    match transport.read_line().await? {
        Some(reply) => {
            println!("{reply}");
            Ok(())
        }
        None => anyhow::bail!("connection closed before a reply was received"),
    }
}

/// Parses the optional params argument; it must be a JSON object.
fn parse_params(raw: Option<&str>) -> anyhow::Result<Option<Map<String, Value>>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(Some(map)),
        Ok(_) => anyhow::bail!("params must be a JSON object"),
        Err(e) => anyhow::bail!("invalid params JSON: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_absent() {
        assert!(parse_params(None).expect("ok").is_none());
    }

    #[test]
    fn params_object() {
        let params = parse_params(Some(r#"{"name":"echo"}"#)).expect("ok").expect("some");
        assert_eq!(params["name"], "echo");
    }

    #[test]
    fn params_must_be_object() {
        assert!(parse_params(Some("[1,2]")).is_err());
        assert!(parse_params(Some("{oops")).is_err());
    }
}
