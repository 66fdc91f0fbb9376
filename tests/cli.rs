mod cli {
    #![allow(non_snake_case)]

    use assert_cmd::prelude::*;
    use mockito::Server;
    use predicates::str::contains;

    use std::io::Write;
    use std::process::Command;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const NAME: &str = "correlation-report";

    // Nothing listens on the discard port, so requests fail fast
    const UNREACHABLE: &str = "http://127.0.0.1:9";

    const RESULT_JSON: &str = r#"{
        "job_id": "corr_20250101_120000",
        "correlations": {"price": 0.72, "volume": -0.61, "sentiment": 0.12},
        "p_values": {"price": 0.0004, "volume": 0.02},
        "insights": ["📈 Price tracks coverage closely", "Volume moves against it"],
        "sample_size": 30
    }"#;

    fn result_file(json: &str) -> Result<tempfile::NamedTempFile, std::io::Error> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(json.as_bytes())?;
        Ok(file)
    }

    fn listing_body() -> String {
        format!(
            r#"{{"results": [{RESULT_JSON}, {{"job_id": "corr_20250102_090000", "correlations": {{"a": 0.3}}, "sample_size": 7}}]}}"#
        )
    }

    #[test]
    fn test_output__when_no_subcommand() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.assert().failure().stderr(contains("Usage"));
        Ok(())
    }

    #[test]
    fn test_output__help_lists_subcommands() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--help");

        cmd.assert()
            .success()
            .stdout(contains("list"))
            .stdout(contains("export"))
            .stdout(contains("delete"))
            .stdout(contains("completion-generate"));
        Ok(())
    }

    #[test]
    fn test_export__from_file_saves_report() -> TestResult {
        let input = result_file(RESULT_JSON)?;
        let out_dir = tempfile::tempdir()?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.args(["export", "--no-config", "--api-url", UNREACHABLE, "-t", "2"])
            .arg("--input")
            .arg(input.path())
            .arg("--output-dir")
            .arg(out_dir.path());

        cmd.assert()
            .success()
            .stdout(contains("PDF report saved to"))
            .stdout(contains("News2Market_Analysis_20250101.pdf"));

        let saved = std::fs::read(out_dir.path().join("News2Market_Analysis_20250101.pdf"))?;
        assert!(saved.starts_with(b"%PDF-"));
        Ok(())
    }

    #[tokio::test]
    async fn test_export__with_worker_count_as_json() -> TestResult {
        let mut server = Server::new_async().await;
        let _workers = server
            .mock("GET", "/api/v1/text-processor/workers/active")
            .with_status(200)
            .with_body(r#"{"active_workers": 4}"#)
            .create_async()
            .await;
        let input = result_file(RESULT_JSON)?;
        let out_dir = tempfile::tempdir()?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.args(["export", "--no-config", "--format", "json", "--api-url"])
            .arg(server.url())
            .arg("--input")
            .arg(input.path())
            .arg("-o")
            .arg(out_dir.path());

        let output = cmd.output()?;
        assert!(output.status.success());
        let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        assert_eq!(value["status"], "success");
        assert_eq!(value["pages"], 2);
        assert_eq!(value["job_id"], "corr_20250101_120000");
        assert_eq!(value["significant_metrics"].as_array().map(Vec::len), Some(2));
        Ok(())
    }

    #[tokio::test]
    async fn test_export__latest_from_gateway() -> TestResult {
        let mut server = Server::new_async().await;
        let _results = server
            .mock("GET", "/api/v1/correlation/results")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(listing_body())
            .create_async()
            .await;
        let out_dir = tempfile::tempdir()?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.args(["export", "--no-config", "--api-url"])
            .arg(server.url())
            .arg("-o")
            .arg(out_dir.path());

        cmd.assert().success();
        assert!(
            out_dir
                .path()
                .join("News2Market_Analysis_20250101.pdf")
                .exists()
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_export__by_job_id_from_gateway() -> TestResult {
        let mut server = Server::new_async().await;
        let _results = server
            .mock("GET", "/api/v1/correlation/results")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(listing_body())
            .create_async()
            .await;
        let out_dir = tempfile::tempdir()?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.args(["export", "corr_20250102_090000", "--no-config", "--api-url"])
            .arg(server.url())
            .arg("-o")
            .arg(out_dir.path());

        cmd.assert().success();
        assert!(
            out_dir
                .path()
                .join("News2Market_Analysis_20250102.pdf")
                .exists()
        );
        Ok(())
    }

    #[test]
    fn test_export__invalid_input_reports_generic_failure() -> TestResult {
        let input = result_file(r#"{"job_id": "corr_1"}"#)?;
        let out_dir = tempfile::tempdir()?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.args(["export", "--no-config", "--api-url", UNREACHABLE])
            .arg("--input")
            .arg(input.path())
            .arg("-o")
            .arg(out_dir.path());

        cmd.assert()
            .failure()
            .code(1)
            .stderr(contains("Could not generate the PDF report"));
        assert_eq!(std::fs::read_dir(out_dir.path())?.count(), 0);
        Ok(())
    }

    #[test]
    fn test_export__missing_output_dir_fails() -> TestResult {
        let input = result_file(RESULT_JSON)?;
        let out_dir = tempfile::tempdir()?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.args(["export", "--no-config", "--api-url", UNREACHABLE])
            .arg("--input")
            .arg(input.path())
            .arg("-o")
            .arg(out_dir.path().join("missing"));

        cmd.assert()
            .failure()
            .stderr(contains("Could not generate the PDF report"));
        Ok(())
    }

    #[tokio::test]
    async fn test_list__prints_results() -> TestResult {
        let mut server = Server::new_async().await;
        let _results = server
            .mock("GET", "/api/v1/correlation/results")
            .match_query(mockito::Matcher::UrlEncoded(
                "limit".into(),
                "5".into(),
            ))
            .with_status(200)
            .with_body(listing_body())
            .create_async()
            .await;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.args(["list", "--limit", "5", "--no-config", "--api-url"])
            .arg(server.url());

        cmd.assert()
            .success()
            .stdout(contains("corr_202"))
            .stdout(contains("price +0.720"));
        Ok(())
    }

    #[tokio::test]
    async fn test_list__gateway_error_fails() -> TestResult {
        let mut server = Server::new_async().await;
        let _results = server
            .mock("GET", "/api/v1/correlation/results")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.args(["list", "--no-config", "--api-url"]).arg(server.url());

        cmd.assert().failure().stderr(contains("Error:"));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete__unknown_result() -> TestResult {
        let mut server = Server::new_async().await;
        let _delete = server
            .mock("DELETE", "/api/v1/correlation/results/corr_404")
            .with_status(404)
            .create_async()
            .await;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.args(["delete", "corr_404", "--yes", "--no-config", "--api-url"])
            .arg(server.url());

        cmd.assert().failure().stderr(contains("corr_404"));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete__success_as_json() -> TestResult {
        let mut server = Server::new_async().await;
        let _delete = server
            .mock("DELETE", "/api/v1/correlation/results/corr_1")
            .with_status(204)
            .create_async()
            .await;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.args(["delete", "corr_1", "-y", "--no-config", "--format", "json", "--api-url"])
            .arg(server.url());

        cmd.assert()
            .success()
            .stdout(contains(r#""deleted":"corr_1""#));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete__refused_without_terminal_or_yes() -> TestResult {
        let mut server = Server::new_async().await;
        let delete = server
            .mock("DELETE", "/api/v1/correlation/results/corr_1")
            .expect(0)
            .create_async()
            .await;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.args(["delete", "corr_1", "--no-config", "--api-url"])
            .arg(server.url());

        cmd.assert()
            .failure()
            .code(1)
            .stderr(contains("--yes"));
        delete.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_delete__with_yes_skips_prompt() -> TestResult {
        let mut server = Server::new_async().await;
        let delete = server
            .mock("DELETE", "/api/v1/correlation/results/corr_1")
            .with_status(200)
            .expect(1)
            .create_async()
            .await;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.args(["delete", "corr_1", "--yes", "--no-config", "--api-url"])
            .arg(server.url());

        cmd.assert().success().stdout(contains("Deleted result"));
        delete.assert_async().await;
        Ok(())
    }

    #[test]
    fn test_config__invalid_file_is_rejected() -> TestResult {
        let mut config = tempfile::NamedTempFile::new()?;
        config.write_all(b"timeout = 0\n")?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.args(["list", "--config"]).arg(config.path());

        cmd.assert().failure().stderr(contains("Error:"));
        Ok(())
    }

    #[test]
    fn test_completion_generate__bash() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.args(["completion-generate", "bash"]);

        cmd.assert().success().stdout(contains("correlation-report"));
        Ok(())
    }
}
