use std::path::Path;
use std::process::{Command, Output};

const NO_TEXT: &str = r#"{"plot_conf": {"draw_labels": false, "plot_width": 160, "plot_height": 120, "samples": 50}}"#;

fn scratch() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("graph_config.json"), NO_TEXT).unwrap();
    dir
}

fn polyplot(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_polyplot"))
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap()
}

fn pngs(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .unwrap()
        .filter(|e| e.as_ref().unwrap().path().extension().is_some_and(|ext| ext == "png"))
        .count()
}

#[test]
fn wrong_argument_count() {
    let dir = scratch();
    std::fs::write(dir.path().join("exprs.txt"), "x**2\n").unwrap();
    let cases: [&[&str]; 3] = [&[], &["exprs.txt", "h", "0", "5"], &["exprs.txt", "h", "0", "5", "5", "extra"]];
    for args in cases {
        let out = polyplot(dir.path(), args);
        assert!(out.status.success(), "{args:?}");
        assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "Please only call me with exactly five parameters");
    }
    assert_eq!(pngs(dir.path()), 0);
}

#[test]
fn plots_hash_frame_png() {
    let dir = scratch();
    std::fs::write(dir.path().join("exprs.txt"), "x**2\n1*x**0+-2*x**1+3*x**2\nsin(x)\n").unwrap();
    let out = polyplot(dir.path(), &["exprs.txt", "987654", "3", "5", "10"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let png = std::fs::read(dir.path().join("987654_3.png")).unwrap();
    assert_eq!(&png[1..4], b"PNG");
    assert_eq!(pngs(dir.path()), 1);
}

#[test]
fn dash_prefixed_parameters_are_plotted() {
    let dir = scratch();
    std::fs::write(dir.path().join("exprs.txt"), "x**2\n").unwrap();
    for (hash, frame) in [("-abc", "0"), ("-h", "--version"), ("--x", "-1")] {
        let out = polyplot(dir.path(), &["exprs.txt", hash, frame, "5", "5"]);
        assert!(out.status.success(), "{hash}: {}", String::from_utf8_lossy(&out.stderr));
        assert!(out.stdout.is_empty(), "{hash}");
        assert!(dir.path().join(format!("{hash}_{frame}.png")).exists(), "{hash}");
    }
    assert_eq!(pngs(dir.path()), 3);

    let help = polyplot(dir.path(), &["--help"]);
    assert!(help.status.success());
    assert!(String::from_utf8_lossy(&help.stdout).contains("Usage"));
    assert_eq!(pngs(dir.path()), 3);
}

#[test]
fn failures_exit_non_zero() {
    let dir = scratch();
    std::fs::write(dir.path().join("bad.txt"), "x**2\n2*(x\n").unwrap();
    std::fs::write(dir.path().join("good.txt"), "x\n").unwrap();

    let cases: [&[&str]; 4] = [
        &["bad.txt", "h", "0", "5", "5"],
        &["missing.txt", "h", "0", "5", "5"],
        &["good.txt", "h", "0", "-5", "5"],
        &["good.txt", "h", "0", "5", "zero"],
    ];
    for args in cases {
        let out = polyplot(dir.path(), args);
        assert!(!out.status.success(), "{args:?}");
        assert!(!out.stderr.is_empty());
    }
    assert_eq!(pngs(dir.path()), 0);
}

#[test]
fn evolve_writes_a_movie() {
    let dir = scratch();
    std::fs::write(dir.path().join("points.csv"), "# x,y\n0,1\n1,3\n2,7\n3,13\n").unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_evolve"))
        .args(["points.csv", "--exprs", "6", "--frames", "3", "--seed", "11", "--out-dir", "out"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let best = String::from_utf8_lossy(&out.stdout).trim().to_owned();
    assert!(best.starts_with(|c: char| c.is_ascii_digit() || c == '-'), "{best}");
    assert!(polyplot::eval_str(best.replace('x', "1")).is_ok());

    let out_dir = dir.path().join("out");
    let gifs: Vec<_> = std::fs::read_dir(&out_dir).unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "gif"))
        .collect();
    assert_eq!(gifs.len(), 1);
    assert_eq!(&std::fs::read(&gifs[0]).unwrap()[..3], b"GIF");
    assert_eq!(pngs(&out_dir), 0);
}
