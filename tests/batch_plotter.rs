use std::fs::{self, File};
use std::path::{Path, PathBuf};

use batch_plotter::plot::PlotStyle;
use batch_plotter::{derive_output_path, BatchPlotter, ErrorKind, PlotError};
use tempfile::TempDir;

const TRIANGLE: &str = "t,input,output\n0,0,0\n1,1,0.5\n2,0,0\n";

fn fast_style() -> PlotStyle {
    PlotStyle {
        dpi: 40,
        ..PlotStyle::default()
    }
}

fn write(root: &Path, rel: &str, contents: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

fn png_files(root: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(root)
        .unwrap()
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".png"))
        .collect();
    names.sort();
    names
}

fn png_info(path: &Path) -> (u32, u32, Option<png::PixelDimensions>) {
    let decoder = png::Decoder::new(File::open(path).unwrap());
    let reader = decoder.read_info().unwrap();
    let info = reader.info();
    (info.width, info.height, info.pixel_dims)
}

#[test]
fn one_plot_per_csv_at_any_depth() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "a.csv", TRIANGLE);
    write(root, "one/b.csv", TRIANGLE);
    write(root, "one/two/three/c.csv", TRIANGLE);

    let summary = BatchPlotter::new(root)
        .with_style(fast_style())
        .run()
        .unwrap();

    assert_eq!(summary.len(), 3);
    assert_eq!(
        png_files(root),
        vec!["plot_a.png", "plot_b.png", "plot_c.png"]
    );
}

#[test]
fn non_csv_files_are_ignored() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "run.csv", TRIANGLE);
    write(root, "notes.txt", "t,input\nnot,a,log\n");
    write(root, "run.CSV", "garbage");
    write(root, "run.csv.bak", "garbage");

    let summary = BatchPlotter::new(root)
        .with_style(fast_style())
        .run()
        .unwrap();

    assert_eq!(summary.len(), 1);
    assert_eq!(png_files(root), vec!["plot_run.png"]);
}

#[test]
fn triangle_log_produces_non_empty_image() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    let source = write(root, "tri.csv", TRIANGLE);

    BatchPlotter::new(root).run().unwrap();

    let output = derive_output_path(root, &source);
    assert_eq!(output, root.join("plot_tri.png"));
    assert!(fs::metadata(&output).unwrap().len() > 0);

    let (width, height, pixel_dims) = png_info(&output);
    assert!(width > 0 && width <= 3000);
    assert!(height > 0 && height <= 1800);
    let dims = pixel_dims.expect("pHYs chunk");
    assert_eq!((dims.xppu, dims.yppu), (11811, 11811));
}

#[test]
fn missing_output_column_aborts_the_run() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "a_good.csv", TRIANGLE);
    write(root, "b_bad.csv", "t,input\n0,0\n1,1\n");
    write(root, "c_never.csv", TRIANGLE);

    let err = BatchPlotter::new(root)
        .with_style(fast_style())
        .run()
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DataFormat);
    assert!(matches!(
        err,
        PlotError::MissingColumn {
            column: "output",
            ..
        }
    ));
    // Earlier output stays, the bad file and everything after it get nothing.
    assert_eq!(png_files(root), vec!["plot_a_good.png"]);
}

#[test]
fn same_name_in_two_subdirectories_overwrites() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "a/step.csv", TRIANGLE);
    write(
        root,
        "b/step.csv",
        "t,input,output\n0,0,0\n10,5,4\n20,5,5\n30,5,5\n",
    );

    let summary = BatchPlotter::new(root)
        .with_style(fast_style())
        .run()
        .unwrap();

    assert_eq!(summary.len(), 2);
    assert_eq!(summary.plots[0].output, summary.plots[1].output);
    assert!(summary.plots[1].source.ends_with("b/step.csv"));
    assert_eq!(png_files(root), vec!["plot_step.png"]);
}

#[test]
fn second_run_reproduces_names_and_dimensions() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "x.csv", TRIANGLE);
    write(root, "sub/y.csv", "t,input,output,extra\n0,1,0,9\n0.5,1,0.8,9\n1,1,1,9\n");

    let plotter = BatchPlotter::new(root).with_style(fast_style());
    let first = plotter.run().unwrap();
    let dims_first: Vec<_> = first
        .plots
        .iter()
        .map(|p| {
            let (width, height, _) = png_info(&p.output);
            (width, height)
        })
        .collect();

    let second = plotter.run().unwrap();
    let dims_second: Vec<_> = second
        .plots
        .iter()
        .map(|p| {
            let (width, height, _) = png_info(&p.output);
            (width, height)
        })
        .collect();

    assert_eq!(first.plots, second.plots);
    assert_eq!(dims_first, dims_second);
    assert_eq!(png_files(root), vec!["plot_x.png", "plot_y.png"]);
}

#[test]
fn missing_root_is_a_filesystem_error() {
    let dir = TempDir::new().unwrap();
    let err = BatchPlotter::new(dir.path().join("absent"))
        .run()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FileSystem);
}

#[test]
fn empty_tree_writes_nothing() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("empty/nested")).unwrap();

    let summary = BatchPlotter::new(dir.path()).run().unwrap();
    assert!(summary.is_empty());
    assert!(png_files(dir.path()).is_empty());
}

#[test]
fn values_near_f64_limits_still_plot() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "x.csv", "t,input,output\n0,-1.7e308,0\n1,1.7e308,0\n");

    let summary = BatchPlotter::new(root)
        .with_style(fast_style())
        .run()
        .unwrap();

    assert_eq!(summary.len(), 1);
    assert_eq!(png_files(root), vec!["plot_x.png"]);
}

#[cfg(unix)]
#[test]
fn dangling_csv_symlink_aborts_with_data_format_error() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "a.csv", TRIANGLE);
    std::os::unix::fs::symlink(root.join("missing.csv"), root.join("b.csv")).unwrap();

    let err = BatchPlotter::new(root)
        .with_style(fast_style())
        .run()
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DataFormat);
    assert!(matches!(err, PlotError::Csv { ref path, .. } if path.ends_with("b.csv")));
    assert_eq!(png_files(root), vec!["plot_a.png"]);
}
