//! Print the OpenAPI document as pretty JSON on stdout.

use std::io::{self, Write};

use training_tracker::ApiDoc;
use utoipa::OpenApi;

fn main() -> io::Result<()> {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(|err| io::Error::other(format!("failed to serialise OpenAPI document: {err}")))?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(json.as_bytes())?;
    stdout.write_all(b"\n")
}
