//! Print the OpenAPI document as JSON.

use backend::doc::ApiDoc;
use utoipa::OpenApi;

fn main() -> std::io::Result<()> {
    let document = ApiDoc::openapi().to_json().map_err(std::io::Error::other)?;
    println!("{document}");
    Ok(())
}
