use error_stack::Report;
use fastly::http::Method;
use fastly::{Error, Request, Response};
use log_fastly::Logger;

use where_am_i_common::error::WhereAmIError;
use where_am_i_common::geo::handle_where_am_i;
use where_am_i_common::settings::Settings;

mod error;
mod http_wrapper;

use crate::error::to_error_response;
use crate::http_wrapper::FastlyRequestWrapper;

#[fastly::main]
fn main(req: Request) -> Result<Response, Error> {
    init_logger();

    let settings = match Settings::new() {
        Ok(s) => s,
        Err(e) => {
            log::error!("Failed to load settings: {:?}", e);
            let report = Report::new(WhereAmIError::Configuration {
                message: e.to_string(),
            });
            return Ok(to_error_response(&report));
        }
    };

    Ok(route_request(&settings, req))
}

/// Routes incoming requests to appropriate handlers.
///
/// The service exposes a single endpoint; everything else is answered
/// with a 404 so misdirected traffic is visible in the logs.
fn route_request(settings: &Settings, req: Request) -> Response {
    log::info!(
        "FASTLY_SERVICE_VERSION: {}",
        ::std::env::var("FASTLY_SERVICE_VERSION").unwrap_or_else(|_| String::new())
    );

    let path = req.get_path().to_string();
    let method = req.get_method().clone();

    let result = match (&method, path.as_str()) {
        (&Method::GET | &Method::OPTIONS, "/where-am-i") => {
            handle_where_am_i(settings, &FastlyRequestWrapper::new(req))
        }

        // No known route matched
        _ => Err(Report::new(WhereAmIError::RouteNotFound {
            method: method.to_string(),
            path,
        })),
    };

    result.unwrap_or_else(|e| to_error_response(&e))
}

fn init_logger() {
    let logger = Logger::builder()
        .default_endpoint("wailog")
        .max_level(log::LevelFilter::Debug)
        .build()
        .expect("Failed to build Logger");

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}  {} {}",
                chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                record.level(),
                message
            ))
        })
        .chain(Box::new(logger) as Box<dyn log::Log>)
        .apply()
        .expect("Failed to initialize logger");
}
