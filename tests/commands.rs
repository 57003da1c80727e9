use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use webp_sequencer_lib::commands::{self, AppendOptions, AppendSource, RebuildOptions};
use webp_sequencer_lib::utils::ValidationError;
use webp_sequencer_lib::{
    AppState, Cli, ConversionResult, ConversionTask, ConvertSettings, ImageConverter,
    SequencerError, SequencerResult,
};

/// Writes the source's bytes straight to the output path.
struct CopyConverter;

impl ImageConverter for CopyConverter {
    fn convert(&self, task: &ConversionTask) -> SequencerResult<ConversionResult> {
        let bytes = fs::read(&task.source_path)?;
        if bytes.starts_with(b"corrupt") {
            return Err(SequencerError::conversion(format!(
                "cannot decode {}",
                task.source_path.display()
            )));
        }
        fs::write(&task.output_path, &bytes)?;
        Ok(ConversionResult {
            number: task.number,
            source_path: task.source_path.clone(),
            output_path: task.output_path.clone(),
            original_size: bytes.len() as u64,
            output_size: bytes.len() as u64,
        })
    }
}

struct Workspace {
    _root: TempDir,
    input: PathBuf,
    output: PathBuf,
}

impl Workspace {
    fn write_input(&self, name: &str, content: &str) -> PathBuf {
        let path = self.input.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn write_output(&self, number: u32, content: &str) {
        fs::write(self.output.join(format!("{number}.webp")), content).unwrap();
    }

    /// `{number: content}` for every file in the output directory.
    fn outputs(&self) -> BTreeMap<String, String> {
        fs::read_dir(&self.output)
            .unwrap()
            .map(|entry| {
                let path = entry.unwrap().path();
                let name = path.file_name().unwrap().to_string_lossy().into_owned();
                (name, fs::read_to_string(&path).unwrap_or_default())
            })
            .collect()
    }

    fn numbered(&self) -> BTreeMap<u32, String> {
        self.outputs()
            .into_iter()
            .filter_map(|(name, content)| {
                let number = name.strip_suffix(".webp")?.parse().ok()?;
                Some((number, content))
            })
            .collect()
    }
}

#[fixture]
fn workspace() -> Workspace {
    let root = TempDir::new().unwrap();
    let input = root.path().join("input");
    let output = root.path().join("output");
    fs::create_dir(&input).unwrap();
    fs::create_dir(&output).unwrap();
    Workspace { _root: root, input, output }
}

fn state() -> AppState {
    AppState::with_converter(Arc::new(CopyConverter))
}

fn rebuild_options(ws: &Workspace, dirty: bool) -> RebuildOptions {
    RebuildOptions {
        output: ws.output.clone(),
        input: ws.input.clone(),
        dirty,
        threads: Some(2),
    }
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed)
}

fn values(map: &BTreeMap<u32, String>) -> Vec<String> {
    let mut values: Vec<String> = map.values().cloned().collect();
    values.sort();
    values
}

#[rstest]
#[tokio::test]
async fn rebuild_numbers_every_source_once(workspace: Workspace) {
    for name in ["a.png", "b.JPG", "c.jpeg", "d.webp", "e.tiff"] {
        workspace.write_input(name, name);
    }
    workspace.write_input("photo.GIF", "gif");
    workspace.write_input("notes.txt", "txt");

    let results = commands::rebuild(&state(), &rebuild_options(&workspace, false), &mut rng())
        .await
        .unwrap();

    assert_eq!(results.len(), 5);
    let numbered = workspace.numbered();
    assert_eq!(numbered.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    assert_eq!(values(&numbered), vec!["a.png", "b.JPG", "c.jpeg", "d.webp", "e.tiff"]);
}

#[rstest]
#[tokio::test]
async fn rebuild_clears_output_unless_dirty(workspace: Workspace) {
    workspace.write_input("a.png", "a");
    workspace.write_output(7, "stale");
    fs::write(workspace.output.join("notes.txt"), "x").unwrap();

    commands::rebuild(&state(), &rebuild_options(&workspace, true), &mut rng())
        .await
        .unwrap();
    assert_eq!(workspace.outputs().len(), 3);
    assert_eq!(workspace.numbered().get(&7).map(String::as_str), Some("stale"));

    commands::rebuild(&state(), &rebuild_options(&workspace, false), &mut rng())
        .await
        .unwrap();
    let outputs = workspace.outputs();
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs.get("1.webp").map(String::as_str), Some("a"));
}

#[rstest]
#[tokio::test]
async fn rebuild_checks_output_before_input(workspace: Workspace) {
    let options = RebuildOptions {
        output: workspace.output.join("missing"),
        input: workspace.input.join("missing"),
        dirty: false,
        threads: None,
    };
    let error = commands::rebuild(&state(), &options, &mut rng()).await.unwrap_err();
    assert_eq!(error.exit_code(), 2);

    let options = RebuildOptions {
        output: workspace.output.clone(),
        input: workspace.input.join("missing"),
        dirty: false,
        threads: None,
    };
    workspace.write_output(1, "kept");
    let error = commands::rebuild(&state(), &options, &mut rng()).await.unwrap_err();
    assert_eq!(error.exit_code(), 1);
    // Nothing is cleared when the input is unusable.
    assert_eq!(workspace.numbered().len(), 1);
}

#[rstest]
#[tokio::test]
async fn append_extends_after_existing_numbers(workspace: Workspace) {
    for number in 1..=3 {
        workspace.write_output(number, &format!("old{number}"));
    }
    let new: Vec<PathBuf> = ["x.png", "y.png"]
        .iter()
        .map(|name| workspace.write_input(name, name))
        .collect();

    let options = AppendOptions {
        output: workspace.output.clone(),
        source: AppendSource::Files(new),
        threads: Some(1),
    };
    commands::append(&state(), &options, &mut rng()).await.unwrap();

    let numbered = workspace.numbered();
    assert_eq!(numbered.len(), 5);
    for number in 1..=3 {
        assert_eq!(numbered[&number], format!("old{number}"));
    }
    let mut appended = vec![numbered[&4].clone(), numbered[&5].clone()];
    appended.sort();
    assert_eq!(appended, vec!["x.png", "y.png"]);
}

#[rstest]
#[tokio::test]
async fn append_from_directory_starts_after_max(workspace: Workspace) {
    workspace.write_output(2, "two");
    workspace.write_output(9, "nine");
    workspace.write_input("new.bmp", "new");

    let options = AppendOptions {
        output: workspace.output.clone(),
        source: AppendSource::Directory(workspace.input.clone()),
        threads: None,
    };
    commands::append(&state(), &options, &mut rng()).await.unwrap();

    let numbered = workspace.numbered();
    assert_eq!(numbered.keys().copied().collect::<Vec<_>>(), vec![2, 9, 10]);
    assert_eq!(numbered[&10], "new");
}

#[rstest]
#[tokio::test]
async fn append_without_images_fails_with_exit_code_3(workspace: Workspace) {
    let text = workspace.write_input("notes.txt", "not an image");
    let options = AppendOptions {
        output: workspace.output.clone(),
        source: AppendSource::Files(vec![text]),
        threads: None,
    };

    let error = commands::append(&state(), &options, &mut rng()).await.unwrap_err();

    assert!(matches!(error, SequencerError::Validation(ValidationError::NoImages)));
    assert_eq!(error.exit_code(), 3);
    assert!(workspace.outputs().is_empty());
}

#[rstest]
#[tokio::test]
async fn append_skips_non_images_in_explicit_list(workspace: Workspace) {
    let image = workspace.write_input("keep.heic", "heic");
    let text = workspace.write_input("notes.txt", "txt");
    let options = AppendOptions {
        output: workspace.output.clone(),
        source: AppendSource::Files(vec![text, image]),
        threads: None,
    };

    let results = commands::append(&state(), &options, &mut rng()).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(workspace.numbered().get(&1).map(String::as_str), Some("heic"));
}

#[rstest]
#[case(u32::MAX - 1)]
#[case(u32::MAX)]
#[tokio::test]
async fn append_refuses_numbers_past_u32_max(workspace: Workspace, #[case] highest: u32) {
    workspace.write_output(highest, "last");
    let new: Vec<PathBuf> = ["x.png", "y.png", "z.png"]
        .iter()
        .map(|name| workspace.write_input(name, name))
        .collect();
    let options = AppendOptions {
        output: workspace.output.clone(),
        source: AppendSource::Files(new),
        threads: Some(1),
    };

    let error = commands::append(&state(), &options, &mut rng()).await.unwrap_err();

    assert!(matches!(
        error,
        SequencerError::Validation(ValidationError::NumberingExhausted { .. })
    ));
    assert_eq!(error.exit_code(), 8);
    assert_eq!(workspace.outputs().len(), 1);
    assert_eq!(workspace.numbered().get(&highest).map(String::as_str), Some("last"));
}

#[rstest]
#[tokio::test]
async fn append_with_missing_input_directory_fails_with_exit_code_1(workspace: Workspace) {
    let options = AppendOptions {
        output: workspace.output.clone(),
        source: AppendSource::Directory(workspace.input.join("nope")),
        threads: None,
    };
    let error = commands::append(&state(), &options, &mut rng()).await.unwrap_err();
    assert_eq!(error.exit_code(), 1);
}

#[rstest]
#[tokio::test]
async fn conversion_failure_aborts_with_exit_code_5(workspace: Workspace) {
    workspace.write_input("good.png", "good");
    workspace.write_input("bad.png", "corrupt bytes");

    let error = commands::rebuild(&state(), &rebuild_options(&workspace, false), &mut rng())
        .await
        .unwrap_err();

    assert!(matches!(error, SequencerError::Conversion(_)));
    assert_eq!(error.exit_code(), 5);
}

#[rstest]
fn delete_compacts_survivors_in_order(workspace: Workspace) {
    for number in 1..=5 {
        workspace.write_output(number, &format!("img{number}"));
    }

    commands::delete(&workspace.output, &[2, 4]).unwrap();

    let numbered = workspace.numbered();
    assert_eq!(
        numbered.into_iter().collect::<Vec<_>>(),
        vec![(1, "img1".to_string()), (2, "img3".to_string()), (3, "img5".to_string())]
    );
}

#[rstest]
fn delete_missing_number_is_not_fatal(workspace: Workspace) {
    for number in 1..=3 {
        workspace.write_output(number, &format!("img{number}"));
    }

    let summary = commands::delete(&workspace.output, &[99]).unwrap();

    assert_eq!(summary.missing, vec![99]);
    assert_eq!(workspace.numbered().keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[rstest]
fn delete_with_nothing_to_remove_closes_gaps(workspace: Workspace) {
    workspace.write_output(3, "c");
    workspace.write_output(8, "h");
    fs::write(workspace.output.join("cover.jpg"), "untouched").unwrap();

    commands::delete(&workspace.output, &[1]).unwrap();

    let outputs = workspace.outputs();
    assert_eq!(outputs.get("1.webp").map(String::as_str), Some("c"));
    assert_eq!(outputs.get("2.webp").map(String::as_str), Some("h"));
    assert_eq!(outputs.get("cover.jpg").map(String::as_str), Some("untouched"));
    assert_eq!(outputs.len(), 3);
}

#[rstest]
fn delete_requires_output_directory(workspace: Workspace) {
    let error = commands::delete(&workspace.output.join("missing"), &[1]).unwrap_err();
    assert_eq!(error.exit_code(), 2);
}

#[tokio::test]
async fn run_without_command_fails_with_exit_code_4() {
    use clap::Parser;

    let cli = Cli::try_parse_from(["webp-sequencer", "out"]).unwrap();
    let error = webp_sequencer_lib::run(cli).await.unwrap_err();
    assert_eq!(error.exit_code(), 4);
}

#[rstest]
#[tokio::test]
async fn native_rebuild_with_heic_source_keeps_existing_outputs(workspace: Workspace) {
    workspace.write_output(1, "published");
    workspace.write_output(2, "published");
    image::RgbImage::new(4, 4).save(workspace.input.join("a.png")).unwrap();
    workspace.write_input("phone.heic", "ftypheic");

    let error = commands::rebuild(&AppState::default(), &rebuild_options(&workspace, false), &mut rng())
        .await
        .unwrap_err();

    assert!(matches!(
        &error,
        SequencerError::Validation(ValidationError::UndecodableSource(path)) if path.ends_with("phone.heic")
    ));
    assert_eq!(error.exit_code(), 7);
    assert_eq!(values(&workspace.numbered()), vec!["published", "published"]);
}

#[rstest]
#[tokio::test]
async fn native_append_with_heif_file_writes_nothing(workspace: Workspace) {
    let heif = workspace.write_input("scan.HEIF", "ftypheif");
    let options = AppendOptions {
        output: workspace.output.clone(),
        source: AppendSource::Files(vec![heif]),
        threads: None,
    };

    let error = commands::append(&AppState::default(), &options, &mut rng()).await.unwrap_err();

    assert_eq!(error.exit_code(), 7);
    assert!(workspace.outputs().is_empty());
}

#[rstest]
#[tokio::test]
async fn native_rebuild_produces_bounded_webp(workspace: Workspace) {
    image::RgbImage::from_pixel(64, 16, image::Rgb([0, 128, 255]))
        .save(workspace.input.join("wide.png"))
        .unwrap();
    image::RgbImage::new(8, 8).save(workspace.input.join("tiny.bmp")).unwrap();

    let state = AppState::new(ConvertSettings { max_dimension: 32 });
    commands::rebuild(&state, &rebuild_options(&workspace, false), &mut rng())
        .await
        .unwrap();

    let mut sizes: Vec<(u32, u32)> = (1..=2)
        .map(|n| image::open(workspace.output.join(format!("{n}.webp"))).unwrap())
        .map(|img| (img.width(), img.height()))
        .collect();
    sizes.sort();
    assert_eq!(sizes, vec![(8, 8), (32, 8)]);
}

