//! CLI integration tests against real INI and CSV files on disk.

mod common;

use clap::Parser;
use common::SAMPLE_CSV;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thrustdeck::adapters::file_config_adapter::FileConfigAdapter;
use thrustdeck::cli::{self, Cli};
use thrustdeck::domain::engine::EngineType;
use thrustdeck::domain::settings::build_projection_request;
use thrustdeck::ports::holdings_port::HoldingsPort;

fn write_temp(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// ExitCode has no PartialEq, compare the debug form instead.
fn same_code(actual: ExitCode, expected: u8) -> bool {
    format!("{actual:?}") == format!("{:?}", ExitCode::from(expected))
}

fn run(args: &[&str]) -> ExitCode {
    let mut argv = vec!["thrustdeck"];
    argv.extend_from_slice(args);
    cli::run(Cli::try_parse_from(argv).unwrap())
}

fn path_str(p: &Path) -> String {
    p.display().to_string()
}

mod config_loading {
    use super::*;

    #[test]
    fn projection_request_from_ini_file() {
        let ini = write_temp(
            "[projection]\ninitial_investment = 2500\nmonthly_investment = 100\nengine_type = Wind-Dependent\ndesired_goal = 50000\nmax_years = 30\n",
            ".ini",
        );
        let config = cli::load_config(Some(ini.path())).unwrap();
        let request = build_projection_request(&config).unwrap();
        assert_eq!(request.initial_investment, 2_500.0);
        assert_eq!(request.monthly_investment, 100.0);
        assert_eq!(request.engine_type, EngineType::WindDependent);
        assert_eq!(request.desired_goal, 50_000.0);
        assert_eq!(request.max_years, 30);
    }

    #[test]
    fn holdings_source_reads_data_path_from_config() {
        let csv = write_temp(SAMPLE_CSV, ".csv");
        let ini = write_temp(&format!("[data]\npath = {}\n", path_str(csv.path())), ".ini");
        let config = cli::load_config(Some(ini.path())).unwrap();
        let source = cli::holdings_source(&config, None).unwrap();
        assert_eq!(source.load_holdings().unwrap().len(), 4);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        assert!(cli::load_config(Some(Path::new("/nonexistent/thrustdeck.ini"))).is_err());
        assert!(cli::load_config(None).is_ok());
    }

    #[test]
    fn empty_config_still_builds_defaults() {
        let request = build_projection_request(&FileConfigAdapter::empty()).unwrap();
        assert_eq!(request.max_years, 50);
    }
}

mod commands {
    use super::*;

    #[test]
    fn every_read_command_succeeds_on_sample_data() {
        let csv = write_temp(SAMPLE_CSV, ".csv");
        let data = path_str(csv.path());
        let commands: [&[&str]; 9] = [
            &["summary"],
            &["engines", "--metric", "value"],
            &["project", "--points", "5"],
            &["income", "--years", "3"],
            &["timeline", "--period", "6months"],
            &["flight-log", "--period", "1month"],
            &["movers", "--limit", "2"],
            &["search", "monthly"],
            &["search", "--engine", "elite"],
        ];
        for args in commands {
            let mut argv: Vec<&str> = args.to_vec();
            argv.extend(["--data", data.as_str()]);
            assert!(same_code(run(&argv), 0), "{args:?} failed");
        }
    }

    #[test]
    fn project_does_not_need_holdings_to_exist() {
        let code = run(&["project", "--data", "/nonexistent/h.csv", "--max-years", "2"]);
        assert!(same_code(code, 0));
    }

    #[test]
    fn project_runs_without_data_or_config() {
        assert!(same_code(run(&["project", "--max-years", "2"]), 0));
    }

    #[test]
    fn project_still_validates_config() {
        let ini = write_temp("[projection]
max_years = 0
", ".ini");
        let config = path_str(ini.path());
        assert!(same_code(run(&["project", "--config", &config]), 2));
    }

    #[test]
    fn income_horizon_is_bounded() {
        let csv = write_temp(SAMPLE_CSV, ".csv");
        let data = path_str(csv.path());
        assert!(same_code(run(&["income", "--years", "400000000", "--data", &data]), 2));
        assert!(same_code(run(&["income", "--years", "0", "--data", &data]), 2));
        assert!(same_code(run(&["income", "--years", "100", "--data", &data]), 0));
    }

    #[test]
    fn missing_data_file_exits_with_source_code() {
        let code = run(&["summary", "--data", "/nonexistent/h.csv"]);
        assert!(same_code(code, 3));
    }

    #[test]
    fn missing_data_path_exits_with_config_code() {
        assert!(same_code(run(&["summary"]), 2));
    }

    #[test]
    fn invalid_config_value_exits_with_config_code() {
        let ini = write_temp("[data]\npath = h.csv\n[projection]\nmax_years = 0\n", ".ini");
        let config = path_str(ini.path());
        assert!(same_code(run(&["summary", "--config", &config]), 2));
    }

    #[test]
    fn unknown_engine_exits_with_engine_code() {
        let csv = write_temp(SAMPLE_CSV, ".csv");
        let data = path_str(csv.path());
        let code = run(&["search", "--engine", "warp", "--data", &data]);
        assert!(same_code(code, 4));
    }

    #[test]
    fn unknown_rank_metric_is_rejected() {
        let csv = write_temp(SAMPLE_CSV, ".csv");
        let data = path_str(csv.path());
        let code = run(&["engines", "--metric", "volume", "--data", &data]);
        assert!(same_code(code, 2));
    }

    #[test]
    fn data_flag_is_global() {
        let cli = Cli::try_parse_from(["thrustdeck", "--data", "a.csv", "movers"]).unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("a.csv")));
    }
}
