//! Tsubaki Console
//!
//! Line-delimited JSON harness for the process-wide addon registry.
//! One request per stdin line, one response per stdout line; logs go to stderr.
//!
//! Methods:
//! - names: declared addon names in registration order
//! - execute: dispatch `{domains, args}` to the best-matching addon
//! - get: resolve `{name, ignoreCase?, advanceSearch?}` to an addon type name
//! - invoke: resolve like `get`, then run the addon directly with `args`
//!
//! ```text
//! {"id":1,"method":"execute","params":{"domains":["math","sum"],"args":["1","2"]}}
//! {"id":1,"result":{"result":"success","callback":3}}
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::io::{self, BufRead, Write};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use tsubaki_addons::{AddonProvider, Lookup, ADDONS_PATH_VAR};
use tsubaki_core::{AddonError, Callback};

const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Console-level error codes; registry errors keep their own codes
mod codes {
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const INVALID_PARAMS: &str = "INVALID_PARAMS";
    pub const METHOD_NOT_FOUND: &str = "METHOD_NOT_FOUND";
}

#[derive(Debug, Deserialize)]
struct ConsoleRequest {
    #[serde(default)]
    id: Option<JsonValue>,
    method: String,
    #[serde(default)]
    params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
struct ConsoleResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ConsoleError>,
}

#[derive(Debug, Serialize)]
struct ConsoleError {
    code: String,
    message: String,
}

impl ConsoleError {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

impl From<AddonError> for ConsoleError {
    fn from(err: AddonError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ExecuteParams {
    #[serde(default)]
    domains: Vec<String>,
    #[serde(default)]
    args: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupParams {
    name: String,
    #[serde(default)]
    ignore_case: bool,
    #[serde(default)]
    advance_search: bool,
    #[serde(default)]
    args: Vec<String>,
}

impl LookupParams {
    fn query(&self) -> Lookup<'_> {
        Lookup::new(&self.name)
            .ignore_case(self.ignore_case)
            .advance_search(self.advance_search)
    }
}

fn parse_params<T: DeserializeOwned>(params: &Option<JsonValue>) -> Result<T, ConsoleError> {
    let value = params.clone().unwrap_or_else(|| json!({}));
    serde_json::from_value(value)
        .map_err(|e| ConsoleError::new(codes::INVALID_PARAMS, format!("Invalid params: {}", e)))
}

/// Show the side channel when it holds a type we know how to print
fn render_callback(callback: Option<Callback>) -> JsonValue {
    let Some(cb) = callback else {
        return JsonValue::Null;
    };
    if let Some(s) = cb.downcast_ref::<String>() {
        json!(s)
    } else if let Some(s) = cb.downcast_ref::<&'static str>() {
        json!(s)
    } else if let Some(n) = cb.downcast_ref::<i64>() {
        json!(n)
    } else if let Some(n) = cb.downcast_ref::<usize>() {
        json!(n)
    } else if let Some(v) = cb.downcast_ref::<JsonValue>() {
        v.clone()
    } else {
        json!("<opaque>")
    }
}

fn handle_request(provider: &AddonProvider, request: &ConsoleRequest) -> ConsoleResponse {
    let result = match request.method.as_str() {
        "names" => Ok(handle_names(provider)),
        "execute" => handle_execute(provider, &request.params),
        "get" => handle_get(provider, &request.params),
        "invoke" => handle_invoke(provider, &request.params),
        _ => Err(ConsoleError::new(
            codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", request.method),
        )),
    };

    match result {
        Ok(r) => ConsoleResponse {
            id: request.id.clone(),
            result: Some(r),
            error: None,
        },
        Err(e) => ConsoleResponse {
            id: request.id.clone(),
            result: None,
            error: Some(e),
        },
    }
}

fn handle_names(provider: &AddonProvider) -> JsonValue {
    json!({ "names": provider.addon_names() })
}

fn handle_execute(provider: &AddonProvider, params: &Option<JsonValue>) -> Result<JsonValue, ConsoleError> {
    let params: ExecuteParams = parse_params(params)?;
    let exec = provider.execute(&params.domains, &params.args);
    Ok(json!({
        "result": exec.result,
        "callback": render_callback(exec.callback),
    }))
}

fn handle_get(provider: &AddonProvider, params: &Option<JsonValue>) -> Result<JsonValue, ConsoleError> {
    let params: LookupParams = parse_params(params)?;
    let addon = provider.lookup(params.query())?;
    Ok(json!({ "type": addon.type_name() }))
}

fn handle_invoke(provider: &AddonProvider, params: &Option<JsonValue>) -> Result<JsonValue, ConsoleError> {
    let params: LookupParams = parse_params(params)?;
    let addon = provider.lookup(params.query())?;
    let output = addon.execute(&params.args);
    Ok(json!({
        "type": addon.type_name(),
        "state": output.state,
        "callback": render_callback(output.callback),
    }))
}

fn parse_error_response(err: &serde_json::Error) -> ConsoleResponse {
    ConsoleResponse {
        id: None,
        result: None,
        error: Some(ConsoleError::new(codes::PARSE_ERROR, format!("Parse error: {}", err))),
    }
}

fn write_response(out: &mut impl Write, response: &ConsoleResponse) -> io::Result<()> {
    serde_json::to_writer(&mut *out, response)?;
    writeln!(out)?;
    out.flush()
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_logging();

    info!(version = SERVER_VERSION, "Tsubaki console started");
    debug!(bundled = tsubaki_mock::mock_catalog().len(), "Mock addons linked");
    if let Ok(path) = std::env::var(ADDONS_PATH_VAR) {
        info!(path = %path, "Addons directory override");
    }

    let provider = AddonProvider::addons();
    info!(addons = provider.len(), matcher = provider.matcher().name(), "Ready, waiting for requests...");

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                info!("End of input");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let response = match serde_json::from_str::<ConsoleRequest>(line) {
                    Ok(request) => {
                        debug!(method = %request.method, "Processing request");
                        handle_request(provider, &request)
                    }
                    Err(e) => {
                        error!(error = %e, "Error parsing request");
                        parse_error_response(&e)
                    }
                };

                let mut stdout = io::stdout().lock();
                if let Err(e) = write_response(&mut stdout, &response) {
                    error!(error = %e, "Error writing response");
                    break;
                }
            }
            Err(e) => {
                error!(error = %e, "Error reading input");
                break;
            }
        }
    }

    info!("Console shutting down");
}
