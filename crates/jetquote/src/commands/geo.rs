//! Geolocation command handler.

use jetquote_api::types::GeoLocation;

use crate::cli::GlobalOpts;
use crate::config::Context;
use crate::error::CliError;
use crate::output;

fn detail(g: &GeoLocation) -> String {
    let field = |v: Option<&String>| v.map_or("-", String::as_str).to_owned();
    [
        format!("IP:       {}", field(g.ip.as_ref())),
        format!("City:     {}", field(g.city.as_ref())),
        format!(
            "Country:  {} ({})",
            field(g.country_name.as_ref()),
            field(g.country_code.as_ref())
        ),
    ]
    .join("\n")
}

pub async fn handle(ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    let location = ctx
        .geo_client()?
        .lookup()
        .await
        .map_err(|e| ctx.api_error(e))?;
    let out = output::render_single(global.output, &location, detail, |g| {
        g.country_code.clone().unwrap_or_default()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
