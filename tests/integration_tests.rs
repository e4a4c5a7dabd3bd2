//! Integration tests for the partdb CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const RESISTOR_IPN: &str = "R_100_0603_1%_0.1W_ThinFilm";
const JUMPER_IPN: &str = "R_0_Jumper_0603_ThickFilm";
const JUMPER_DPN: &str = "311-0.0GRCT-ND";

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// A temp dir holding a config file and an initialized database
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let ws = Workspace {
            dir: TempDir::new().unwrap(),
        };
        ws.raw()
            .args(["init", "--config"])
            .arg(ws.config())
            .arg("--database")
            .arg(ws.db())
            .assert()
            .success();
        ws
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("config.yaml")
    }

    fn db(&self) -> PathBuf {
        self.dir.path().join("parts.db")
    }

    /// partdb with no config selection, isolated from the caller's env
    fn raw(&self) -> Command {
        let mut cmd = Command::cargo_bin("partdb").unwrap();
        cmd.current_dir(self.dir.path())
            .env_remove("PARTDB_DATABASE")
            .env("PARTDB_CACHE_DIR", fixture("digikey"))
            .env_remove("RUST_LOG");
        cmd
    }

    /// partdb pointed at this workspace's config
    fn cmd(&self) -> Command {
        let mut cmd = self.raw();
        cmd.arg("--config").arg(self.config());
        cmd
    }

    fn add_resistors_csv(&self) {
        self.cmd()
            .args(["add", "--csv"])
            .arg(fixture("resistors.csv"))
            .assert()
            .success();
    }

    fn ipns(&self) -> Vec<String> {
        let output = self
            .cmd()
            .args(["show", "--csv", "--columns", "IPN"])
            .output()
            .unwrap();
        assert!(output.status.success());
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .skip(1)
            .map(str::to_string)
            .collect()
    }
}

// ============================================================================
// init
// ============================================================================

#[test]
fn test_init_without_target_is_usage_error() {
    let tmp = TempDir::new().unwrap();
    Command::cargo_bin("partdb")
        .unwrap()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .code(2);
}

#[test]
fn test_init_writes_config_and_database() {
    let ws = Workspace::new();
    assert!(ws.db().exists());

    let config = fs::read_to_string(ws.config()).unwrap();
    assert!(config.contains("parts.db"));
    assert!(config.contains("Digikey"));
}

#[test]
fn test_init_config_only() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("config.yaml");
    Command::cargo_bin("partdb")
        .unwrap()
        .args(["init", "--config"])
        .arg(&config)
        .assert()
        .success();

    assert!(config.exists());
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
}

#[test]
fn test_init_refuses_existing_database() {
    let ws = Workspace::new();
    ws.raw()
        .args(["init", "--config"])
        .arg(ws.config())
        .arg("--database")
        .arg(ws.db())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

// ============================================================================
// add
// ============================================================================

#[test]
fn test_add_from_csv() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["--verbose", "add", "--csv"])
        .arg(fixture("resistors.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Creating table 'resistor'"))
        .stdout(predicate::str::contains(format!(
            "Adding component '{RESISTOR_IPN}' to table 'resistor'"
        )))
        .stdout(predicate::str::contains(format!(
            "Adding component '{JUMPER_IPN}' to table 'resistor'"
        )));

    assert_eq!(ws.ipns(), vec![RESISTOR_IPN, JUMPER_IPN]);
}

#[test]
fn test_add_from_distributor() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["add", "--digikey", "YAG2320CT-ND", JUMPER_DPN])
        .assert()
        .success();

    assert_eq!(ws.ipns(), vec![RESISTOR_IPN, JUMPER_IPN]);

    ws.cmd()
        .args(["show", "--csv", "--columns", "IPN", "description", "distributor1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\"100Ω ±1%, 0.1W resistor, 0603, thin film\",Digikey",
        ));
}

#[test]
fn test_add_show_api_response() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["add", "--no-db", "--show-api-response", "--digikey", "YAG2320CT-ND"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mpn\": \"RT0603FRE07100RL\""));
}

#[test]
fn test_add_unknown_part_is_skipped() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["add", "--digikey", "NOPE-ND", "YAG2320CT-ND"])
        .assert()
        .success()
        .stderr(predicate::str::contains("NOPE-ND"));

    assert_eq!(ws.ipns(), vec![RESISTOR_IPN]);
}

#[test]
fn test_add_duplicate_rejected() {
    let ws = Workspace::new();
    ws.add_resistors_csv();

    ws.cmd()
        .args(["add", "--csv"])
        .arg(fixture("resistors.csv"))
        .assert()
        .success()
        .stderr(predicate::str::contains("already in table 'resistor'"));

    assert_eq!(ws.ipns().len(), 2);
}

#[test]
fn test_add_increment_duplicates() {
    let ws = Workspace::new();
    ws.add_resistors_csv();

    ws.cmd()
        .args(["-v", "add", "-i", "--csv"])
        .arg(fixture("resistors.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Adding component '{RESISTOR_IPN}_1' to table 'resistor'"
        )));

    assert_eq!(ws.ipns().len(), 4);
}

#[test]
fn test_add_update_existing() {
    let ws = Workspace::new();
    ws.add_resistors_csv();

    ws.cmd()
        .args(["-v", "add", "-u", "--digikey", "YAG2320CT-ND"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Updating component '{RESISTOR_IPN}' in table 'resistor'"
        )));

    assert_eq!(ws.ipns().len(), 2);
}

#[test]
fn test_add_unrecognized_prefix_reports_row() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["add", "--csv"])
        .arg(fixture("bad_prefix.csv"))
        .arg(fixture("diode.csv"))
        .assert()
        .success()
        .stderr(predicate::str::contains("row 2"));

    ws.cmd()
        .args(["show", "--table-names-only"])
        .assert()
        .success()
        .stdout("diode\n");
}

#[test]
fn test_add_no_db_show_csv() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["-q", "add", "--no-db", "--show-csv", "--csv"])
        .arg(fixture("diode.csv"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "IPN,datasheet,description,keywords,value,exclude_from_bom",
        ))
        .stdout(predicate::str::contains("D_DiodesIncorporated_BAT54WS-7-F"));

    ws.cmd()
        .args(["show", "--table-names-only"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_add_without_database_fails() {
    let ws = Workspace::new();
    ws.cmd()
        .arg("--database")
        .arg(ws.dir.path().join("missing.db"))
        .args(["add", "--csv"])
        .arg(fixture("resistors.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not connect to database"));

    assert!(!ws.dir.path().join("missing.db").exists());
}

#[test]
fn test_add_requires_source() {
    let ws = Workspace::new();
    ws.cmd().arg("add").assert().code(2);
}

// ============================================================================
// rm
// ============================================================================

#[test]
fn test_rm_by_dpn_and_ipn() {
    let ws = Workspace::new();
    ws.add_resistors_csv();

    ws.cmd()
        .args(["rm", JUMPER_DPN, RESISTOR_IPN])
        .assert()
        .success();

    assert!(ws.ipns().is_empty());
}

#[test]
fn test_rm_verbose() {
    let ws = Workspace::new();
    ws.add_resistors_csv();

    ws.cmd()
        .args(["--verbose", "rm", JUMPER_DPN])
        .assert()
        .success()
        .stdout(format!(
            "Removing component '{JUMPER_IPN}' from table 'resistor'\n"
        ));

    assert_eq!(ws.ipns(), vec![RESISTOR_IPN]);
}

#[test]
fn test_rm_ambiguous_keeps_rows() {
    let ws = Workspace::new();
    ws.add_resistors_csv();

    // Both resistors are made by YAGEO but MPNs differ; duplicate one instead
    ws.cmd()
        .args(["add", "-i", "--digikey", "YAG2320CT-ND"])
        .assert()
        .success();

    ws.cmd()
        .args(["-v", "rm", "RT0603FRE07100RL"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Multiple components with MPN=='RT0603FRE07100RL' in table 'resistor' ('{RESISTOR_IPN}', '{RESISTOR_IPN}_1'); skipping"
        )));

    assert_eq!(ws.ipns().len(), 3);
}

#[test]
fn test_rm_not_found() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["-v", "rm", "NOTHING"])
        .assert()
        .success()
        .stdout("No component matching 'NOTHING' found\n");
}

// ============================================================================
// show
// ============================================================================

#[test]
fn test_show_table_names() {
    let ws = Workspace::new();
    ws.add_resistors_csv();
    ws.cmd()
        .args(["add", "--csv"])
        .arg(fixture("diode.csv"))
        .assert()
        .success();

    ws.cmd()
        .args(["show", "--table-names-only"])
        .assert()
        .success()
        .stdout("diode\nresistor\n");
}

#[test]
fn test_show_minimal_columns_csv() {
    let ws = Workspace::new();
    ws.add_resistors_csv();
    ws.cmd()
        .args(["add", "--csv"])
        .arg(fixture("diode.csv"))
        .assert()
        .success();

    ws.cmd()
        .args(["show", "--minimal-columns", "--csv"])
        .assert()
        .success()
        .stdout(
            "distributor1,DPN1,distributor2,DPN2,kicad_symbol,kicad_footprint\n\
             Digikey,BAT54WS-FDICT-ND,,,Device:D_Schottky,Diode_SMD:D_SOD-323\n\
             Digikey,YAG2320CT-ND,,,Device:R,Resistor_SMD:R_0603_1608Metric\n\
             Digikey,311-0.0GRCT-ND,,,Device:R,Resistor_SMD:R_0603_1608Metric\n",
        );
}

#[test]
fn test_show_reports_nonexistent_tables_and_columns() {
    let ws = Workspace::new();
    ws.add_resistors_csv();

    ws.cmd()
        .args([
            "show",
            "--tables",
            "resistor",
            "invalid_table",
            "--columns",
            "IPN",
            "DPN1",
            "invalid_column",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "skipping nonexistent tables: invalid_table",
        ))
        .stderr(predicate::str::contains(
            "skipping nonexistent columns: invalid_column",
        ))
        .stdout(predicate::str::contains(RESISTOR_IPN))
        .stdout(predicate::str::contains("YAG2320CT-ND"))
        .stdout(predicate::str::contains("description").not());
}

#[test]
fn test_show_all_columns_sorted() {
    let ws = Workspace::new();
    ws.add_resistors_csv();

    ws.cmd()
        .args(["show", "--all-columns", "--csv", "--tables", "resistor"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "DPN1,DPN2,IPN,MPN,composition,datasheet,description,distributor1,distributor2,\
             exclude_from_board,exclude_from_bom,keywords,kicad_footprint,kicad_symbol,\
             manufacturer,package,power,resistance,tolerance,value\n",
        ));
}

#[test]
fn test_completions() {
    Command::cargo_bin("partdb")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("partdb"));
}
