use std::io::Write;

use crate::{args::parse_location, provider::WeatherClient};

/// Run the `weather` command against `client` and return the exit code.
///
/// `args` is the full argument vector including the program name. On success
/// exactly one line (the rendered conditions) goes to `stdout`; every failure
/// writes a diagnostic to `stderr` and returns 1 without touching `stdout`.
pub async fn run_cli<C, S, W, E>(client: &C, args: &[S], stdout: &mut W, stderr: &mut E) -> i32
where
    C: WeatherClient + ?Sized,
    S: AsRef<str>,
    W: Write,
    E: Write,
{
    let location = match parse_location(args) {
        Ok(location) => location,
        Err(err) => {
            let _ = writeln!(stderr, "{err}");
            return 1;
        }
    };

    let conditions = match client.current(&location).await {
        Ok(conditions) => conditions,
        Err(err) => {
            let _ = writeln!(
                stderr,
                "couldn't fetch weather conditions for location {location:?}: {err}"
            );
            return 1;
        }
    };

    if let Err(err) = writeln!(stdout, "{conditions}") {
        let _ = writeln!(stderr, "couldn't write output: {err}");
        return 1;
    }

    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{Result, WeatherError},
        model::Conditions,
    };
    use async_trait::async_trait;

    #[derive(Debug)]
    struct StubClient;

    #[async_trait]
    impl WeatherClient for StubClient {
        async fn current(&self, location: &str) -> Result<Conditions> {
            if location != "London" {
                return Err(WeatherError::Http("404 Not Found".to_string()));
            }
            Ok(Conditions {
                summary: "Drizzle".to_string(),
                temperature_celsius: 7.17,
            })
        }
    }

    async fn run(args: &[&str]) -> (i32, String, String) {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let code = run_cli(&StubClient, args, &mut stdout, &mut stderr).await;
        (
            code,
            String::from_utf8(stdout).expect("stdout is utf-8"),
            String::from_utf8(stderr).expect("stderr is utf-8"),
        )
    }

    #[tokio::test]
    async fn prints_conditions_for_known_location() {
        let (code, out, err) = run(&["weather", "London"]).await;
        assert_eq!(code, 0);
        assert_eq!(out, "Drizzle 7.2ºC\n");
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn missing_location_exits_with_error() {
        let (code, out, err) = run(&["weather"]).await;
        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert_eq!(err, "location not provided\n");
    }

    #[tokio::test]
    async fn client_failure_is_reported_with_location() {
        let (code, out, err) = run(&["weather", "Atlantis,", "XX"]).await;
        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert_eq!(
            err,
            "couldn't fetch weather conditions for location \"Atlantis,XX\": 404 Not Found\n"
        );
    }

    #[tokio::test]
    async fn works_with_trait_objects() {
        let client: Box<dyn WeatherClient> = Box::new(StubClient);
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let code = run_cli(client.as_ref(), &["weather", "London"], &mut stdout, &mut stderr).await;
        assert_eq!(code, 0);
        assert_eq!(stdout, "Drizzle 7.2ºC\n".as_bytes());
    }
}
