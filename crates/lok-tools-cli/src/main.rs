//! lok-tools - LibreOfficeKit command-line utilities
//!
//! Four small tools behind one binary: document format conversion, scripted
//! key input into Calc sheets, per-sheet screenshot capture, and slide-deck
//! rasterization to PNG.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use libreoffice_kit::sys::{AWT_KEY_DOWN, AWT_KEY_RIGHT};
use libreoffice_kit::{Document, DocumentType, Office};

const PASTE_MIME: &str = "text/plain;charset=utf-8";

#[derive(Parser)]
#[command(name = "lok-tools")]
#[command(
    author,
    version,
    about = "Drive LibreOffice documents through LibreOfficeKit"
)]
struct Cli {
    /// LibreOffice program directory
    #[arg(
        short = 'p',
        long,
        global = true,
        env = "LOK_PROGRAM_PATH",
        default_value = "/usr/lib/libreoffice/program"
    )]
    program_path: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a document to another format (derived from the extension)
    Convert {
        /// Input document
        from: PathBuf,

        /// Output document; format follows the extension (e.g. .pdf, .ods)
        to: PathBuf,
    },

    /// Navigate to a cell in a Calc file, paste a label, and save
    KeyInput {
        /// Target column (A-Z)
        #[arg(short, long, default_value = "A")]
        column: char,

        /// Target row (1-9)
        #[arg(short, long, default_value = "1")]
        row: char,

        /// Calc spreadsheet to edit
        calc_file: PathBuf,

        /// Text label to paste into the target cell
        label: String,
    },

    /// Capture a root-window screenshot into each sheet of a Calc file
    Screenshot {
        /// Cell selected before each capture (column A-Z)
        #[arg(short, long, default_value = "A")]
        column: char,

        /// Cell selected before each capture (row 1-9)
        #[arg(short, long, default_value = "1")]
        row: char,

        /// Number of sheets to fill; missing sheets are created
        #[arg(short, long, default_value = "1")]
        sheets: i32,

        /// Seconds to wait between captures
        #[arg(short, long, default_value = "5")]
        interval: u64,

        /// Calc spreadsheet to edit
        calc_file: PathBuf,
    },

    /// Rasterize each slide of an Impress deck to <base><index>.png
    Split {
        /// Render resolution in dots per inch
        #[arg(short, long, default_value = "96")]
        dpi: u32,

        /// Impress presentation to rasterize
        impress_file: PathBuf,

        /// Output file name prefix
        base_name: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert { from, to } => convert(&cli.program_path, &from, &to),
        Commands::KeyInput {
            column,
            row,
            calc_file,
            label,
        } => key_input(&cli.program_path, &calc_file, column, row, &label),
        Commands::Screenshot {
            column,
            row,
            sheets,
            interval,
            calc_file,
        } => screenshot(&cli.program_path, &calc_file, column, row, sheets, interval),
        Commands::Split {
            dpi,
            impress_file,
            base_name,
        } => split(&cli.program_path, &impress_file, &base_name, dpi),
    }
}

fn open_document<'a>(office: &'a mut Office, path: &Path) -> Result<Document<'a>> {
    office
        .document_load(path)
        .with_context(|| format!("failed to open '{}'", path.display()))
}

fn convert(program_path: &Path, from: &Path, to: &Path) -> Result<()> {
    let mut office = Office::new(program_path).context("failed to initialise LibreOfficeKit")?;
    let mut doc = open_document(&mut office, from)?;

    doc.save_as(to)
        .with_context(|| format!("failed to save '{}'", to.display()))?;

    Ok(())
}

fn key_input(program_path: &Path, calc_file: &Path, column: char, row: char, label: &str) -> Result<()> {
    if label.is_empty() {
        bail!("label must not be empty");
    }
    let column = parse_column(column)?;
    let row = parse_row(row)?;

    let mut office = Office::new(program_path).context("failed to initialise LibreOfficeKit")?;
    let mut doc = open_document(&mut office, calc_file)?;
    doc.require_type(DocumentType::Spreadsheet)?;

    // Walk from A1 to the target cell with arrow keys.
    for _ in 0..(column as u8 - b'A') {
        doc.press_key(AWT_KEY_RIGHT);
    }
    for _ in 0..(row as u8 - b'1') {
        doc.press_key(AWT_KEY_DOWN);
    }

    if let Err(e) = doc.paste(PASTE_MIME, label.as_bytes()) {
        eprintln!("warning: {e}");
    }

    doc.goto_cell("A", "1").context("failed to return to A1")?;
    doc.save().context("failed to save document")?;

    Ok(())
}

fn screenshot(
    program_path: &Path,
    calc_file: &Path,
    column: char,
    row: char,
    sheets: i32,
    interval: u64,
) -> Result<()> {
    let column = parse_column(column)?;
    let row = parse_row(row)?;

    let mut office = Office::new(program_path).context("failed to initialise LibreOfficeKit")?;
    let mut doc = open_document(&mut office, calc_file)?;
    doc.require_type(DocumentType::Spreadsheet)?;

    let capture_file = std::env::temp_dir().join("lok_tools_screen.png");

    for sheet in 0..sheets {
        println!("Taking screenshot for Sheet{}", sheet + 1);

        if sheet >= doc.parts() {
            doc.add_sheet(&format!("Sheet{}", sheet + 1))
                .with_context(|| format!("failed to add sheet {}", sheet + 1))?;
        }
        doc.set_part(sheet);

        doc.goto_cell(&column.to_string(), &row.to_string())
            .context("failed to select capture cell")?;

        if let Err(e) = capture_root_window(&capture_file) {
            eprintln!("warning: failed to take screenshot: {e}");
        }

        doc.insert_graphic(&capture_file)
            .context("failed to insert screenshot")?;
        doc.goto_cell("A", "1").context("failed to return to A1")?;

        std::thread::sleep(Duration::from_secs(interval));
    }

    doc.save().context("failed to save document")?;

    Ok(())
}

/// Capture the X root window with ImageMagick's `import`.
fn capture_root_window(output: &Path) -> Result<()> {
    let status = Command::new("import")
        .arg("-window")
        .arg("root")
        .arg(output)
        .status()
        .context("failed to run 'import' (is ImageMagick installed?)")?;
    if !status.success() {
        bail!("'import' exited with {status}");
    }
    Ok(())
}

fn split(program_path: &Path, impress_file: &Path, base_name: &str, dpi: u32) -> Result<()> {
    if base_name.is_empty() {
        bail!("base name must not be empty");
    }
    if dpi == 0 {
        bail!("dpi must be greater than zero");
    }

    let mut office = Office::new(program_path).context("failed to initialise LibreOfficeKit")?;
    let mut doc = open_document(&mut office, impress_file)?;
    doc.require_type(DocumentType::Presentation)?;

    for part in 0..doc.parts() {
        doc.set_part(part);
        let (page_width, page_height) = doc.size();

        let canvas_width = twips_to_pixels(page_width, dpi);
        let canvas_height = twips_to_pixels(page_height, dpi);
        let mut pixmap = vec![0u8; canvas_width * canvas_height * 4];
        doc.paint_tile(
            &mut pixmap,
            canvas_width as i32,
            canvas_height as i32,
            0,
            0,
            page_width as i32,
            page_height as i32,
        );

        let filename = format!("{base_name}{part}.png");
        write_png(Path::new(&filename), &pixmap, canvas_width as u32, canvas_height as u32)
            .with_context(|| format!("failed to write '{filename}'"))?;
        println!("Wrote {filename}");
    }

    Ok(())
}

/// Convert a twips extent to pixels at the given DPI (1 twip = 1/1440 inch).
fn twips_to_pixels(twips: i64, dpi: u32) -> usize {
    (twips * dpi as i64 / 1440) as usize
}

fn write_png(path: &Path, rgba: &[u8], width: u32, height: u32) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header().context("failed to write PNG header")?;
    writer
        .write_image_data(rgba)
        .context("failed to write PNG data")?;

    Ok(())
}

/// Validate and normalise a column letter to A-Z.
fn parse_column(column: char) -> Result<char> {
    if !column.is_ascii_alphabetic() {
        bail!("column must be a letter A-Z, got '{column}'");
    }
    Ok(column.to_ascii_uppercase())
}

/// Validate a row digit 1-9.
fn parse_row(row: char) -> Result<char> {
    if !('1'..='9').contains(&row) {
        bail!("row must be a digit 1-9, got '{row}'");
    }
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_letters_normalise_to_uppercase() {
        assert_eq!(parse_column('c').unwrap(), 'C');
        assert_eq!(parse_column('Z').unwrap(), 'Z');
        assert!(parse_column('7').is_err());
        assert!(parse_column('$').is_err());
    }

    #[test]
    fn rows_are_single_digits() {
        assert_eq!(parse_row('1').unwrap(), '1');
        assert_eq!(parse_row('9').unwrap(), '9');
        assert!(parse_row('0').is_err());
        assert!(parse_row('A').is_err());
    }

    #[test]
    fn twips_scale_by_dpi() {
        // A 10in x 7.5in slide at 96 dpi.
        assert_eq!(twips_to_pixels(14400, 96), 960);
        assert_eq!(twips_to_pixels(10800, 96), 720);
        // Higher DPI scales linearly.
        assert_eq!(twips_to_pixels(14400, 192), 1920);
        // Truncation matches integer math of the rasterizer.
        assert_eq!(twips_to_pixels(1439, 96), 95);
    }

    #[test]
    fn png_writer_produces_decodable_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tile.png");

        // 2x2 RGBA checkerboard.
        let rgba = [
            255, 0, 0, 255, 0, 255, 0, 255, //
            0, 0, 255, 255, 255, 255, 255, 255,
        ];
        write_png(&path, &rgba, 2, 2).unwrap();

        let decoder = png::Decoder::new(File::open(&path).unwrap());
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        assert_eq!((info.width, info.height), (2, 2));
        assert_eq!(&buf[..info.buffer_size()], &rgba);
    }

    #[test]
    fn cli_parses_all_subcommands() {
        Cli::try_parse_from(["lok-tools", "convert", "in.odt", "out.pdf"]).unwrap();
        Cli::try_parse_from(["lok-tools", "key-input", "-c", "B", "-r", "3", "file.ods", "label"])
            .unwrap();
        Cli::try_parse_from(["lok-tools", "screenshot", "-s", "2", "-i", "1", "file.ods"]).unwrap();
        let cli =
            Cli::try_parse_from(["lok-tools", "-p", "/opt/lo/program", "split", "-d", "120", "deck.odp", "slide"])
                .unwrap();
        assert_eq!(cli.program_path, PathBuf::from("/opt/lo/program"));
    }
}
