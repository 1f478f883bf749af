//! Line-oriented request handler for the learning notes catalog.
//!
//! Reads one JSON request per stdin line and writes one JSON response per
//! stdout line. The catalog lives only as long as the process.
//!
//! Environment: `LEARNNOTE_ID_POLICY`, `LEARNNOTE_LOG_LEVEL`,
//! `LEARNNOTE_LOG_DIR`.

mod api;

use api::CatalogApi;
use learnnote_core::{catalog_config_from_env, init_logging, logging_config_from_env};
use log::{debug, info};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let catalog_config = match catalog_config_from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("learnnote: {err}");
            return ExitCode::FAILURE;
        }
    };

    // Logging is optional; the catalog still serves requests without it.
    if let Err(err) = init_logging(&logging_config_from_env()) {
        eprintln!("learnnote: logging disabled: {err}");
    }
    info!(
        "event=cli_start module=cli status=ok core_version={} id_policy={}",
        learnnote_core::core_version(),
        catalog_config.id_policy.as_str()
    );

    let api = CatalogApi::new(catalog_config);
    match serve(&api, io::stdin().lock(), io::stdout().lock()) {
        Ok(handled) => {
            info!("event=cli_stop module=cli status=ok requests={handled}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("learnnote: i/o failure: {err}");
            ExitCode::FAILURE
        }
    }
}

fn serve(api: &CatalogApi, mut input: impl BufRead, mut output: impl Write) -> io::Result<usize> {
    let mut handled = 0;
    let mut line = Vec::new();
    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        let Some(response) = api.handle_bytes(&line) else {
            continue;
        };
        if !response.is_success() {
            debug!("event=request module=cli status=error code={}", response.status);
        }
        serde_json::to_writer(&mut output, &response)?;
        output.write_all(b"\n")?;
        output.flush()?;
        handled += 1;
    }
    Ok(handled)
}

#[cfg(test)]
mod tests {
    use super::serve;
    use crate::api::CatalogApi;
    use std::io::Cursor;

    #[test]
    fn serve_answers_each_non_blank_line() {
        let api = CatalogApi::default();
        let input = Cursor::new(
            "{\"op\":\"health\"}\n\n{\"op\":\"create\",\"entry\":{\"term\":\"ML\",\"short_description\":\"machine learning\",\"tags\":[\"AI\"]}}\n{\"op\":\"tags\"}\n",
        );
        let mut output = Vec::new();

        let handled = serve(&api, input, &mut output).unwrap();
        assert_eq!(handled, 3);

        let lines = String::from_utf8(output).unwrap();
        let responses = lines
            .lines()
            .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(responses[0]["status"], 200);
        assert_eq!(responses[1]["status"], 201);
        assert_eq!(responses[2]["body"][0]["tag"], "AI");
    }

    #[test]
    fn serve_answers_non_utf8_line_and_keeps_going() {
        let api = CatalogApi::default();
        let mut input = Vec::new();
        input.extend_from_slice(b"{\"op\":\"health\"}\n");
        input.extend_from_slice(b"\xff\xfe garbage\n");
        input.extend_from_slice(b"{\"op\":\"health\"}");
        let mut output = Vec::new();

        let handled = serve(&api, Cursor::new(input), &mut output).unwrap();
        assert_eq!(handled, 3);

        let lines = String::from_utf8(output).unwrap();
        let statuses = lines
            .lines()
            .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
            .map(|response| response["status"].clone())
            .collect::<Vec<_>>();
        assert_eq!(statuses, vec![200, 400, 200]);
    }
}
