//! The build orchestrator: loads every input into the content pool, then
//! runs the layout pipeline once per encoding mode. A stored-mode image
//! that does not fit is discarded wholesale and rebuilt compressed; a
//! compressed-mode image that does not fit is a hard failure.

use anyhow::Context;

use crate::cli::{Args, FileEntry};
use crate::compress::CompressError;
use crate::directory;
use crate::filesys::{self, PlaceError, ProgramFile, MAX_FILE_NUMBER};
use crate::format::cas;
use crate::image::{CartKind, ImageError, RomImage};
use crate::loaders;
use crate::pool::ContentPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuildMode {
    Stored,
    Compressed,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    if args.entries.is_empty() {
        anyhow::bail!("no input files");
    }
    if args.entries.len() > MAX_FILE_NUMBER {
        anyhow::bail!(
            "too many input files ({}, at most {MAX_FILE_NUMBER})",
            args.entries.len()
        );
    }

    match args.cart {
        CartKind::MegaCart => println!("MegaCart mode"),
        CartKind::MultiCart => println!("MultiCart mode"),
    }

    let (pool, files) = load_files(&args.entries)?;

    let capacity = args.rom_size as usize;
    let mut mode = if args.compressed {
        BuildMode::Compressed
    } else {
        BuildMode::Stored
    };
    let image = loop {
        match build_attempt(&pool, &files, args.cart, capacity, mode) {
            Ok(image) => break image,
            Err(AttemptError::Capacity) if mode == BuildMode::Stored => {
                println!("image does not fit uncompressed, retrying in compressed mode");
                mode = BuildMode::Compressed;
            }
            Err(AttemptError::Capacity) => {
                anyhow::bail!("cartridge memory is too low even with compression");
            }
            Err(AttemptError::Compress(err)) => {
                return Err(err).context("compression failed");
            }
        }
    };

    std::fs::write(&args.output, &image).with_context(|| format!("cannot write {}", args.output))?;
    Ok(())
}

fn load_files(entries: &[FileEntry]) -> anyhow::Result<(ContentPool, Vec<ProgramFile>)> {
    let mut pool = ContentPool::new();
    let mut files = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        if index > 0 && entry.extended && !entries[index - 1].extended {
            println!("*** loading extended (2.x) files ***");
        }
        println!("loading: {}", entry.path);

        let bytes =
            std::fs::read(&entry.path).with_context(|| format!("cannot open {}", entry.path))?;
        let cas_container = cas::is_cas_path(&entry.path);
        let payload: &[u8] = if cas_container {
            cas::payload(&bytes).with_context(|| format!("invalid cassette file {}", entry.path))?
        } else {
            &bytes
        };
        if payload.len() > usize::from(u16::MAX) {
            anyhow::bail!(
                "{} is {} bytes, larger than a directory entry can describe",
                entry.path,
                payload.len()
            );
        }
        let content = pool
            .append(payload)
            .with_context(|| format!("cannot load {}", entry.path))?;
        files.push(ProgramFile {
            path: entry.path.clone(),
            content,
            cas_container,
            extended: entry.extended,
        });
    }

    Ok((pool, files))
}

#[derive(Debug)]
enum AttemptError {
    Capacity,
    Compress(CompressError),
}

impl From<ImageError> for AttemptError {
    fn from(_: ImageError) -> Self {
        AttemptError::Capacity
    }
}

impl From<PlaceError> for AttemptError {
    fn from(err: PlaceError) -> Self {
        match err {
            PlaceError::Image(ImageError::Overflow) => AttemptError::Capacity,
            PlaceError::Compress(err) => AttemptError::Compress(err),
        }
    }
}

/// One full layout pass in a fresh session. The caller drops everything
/// built here when the attempt overflows, so nothing carries over into a
/// retry.
fn build_attempt(
    pool: &ContentPool,
    files: &[ProgramFile],
    cart: CartKind,
    capacity: usize,
    mode: BuildMode,
) -> Result<Vec<u8>, AttemptError> {
    let compressed = mode == BuildMode::Compressed;
    let mut image = RomImage::new(cart, capacity);

    image.write_range(loaders::loader(cart, compressed))?;

    let table_at = image.reserve(directory::table_size(files.len()))?;
    let files_at = image.cursor();

    if compressed {
        println!("building compressed ROM file system");
    } else {
        println!("building ROM file system");
    }
    let placements = filesys::place_files(pool, files, &mut image, compressed)?;

    if image.cursor() >= capacity {
        return Err(AttemptError::Capacity);
    }

    directory::write(&mut image, table_at, files_at, files, &placements);

    let used = image.cursor();
    println!(
        "{used} bytes used, {} bytes free, {capacity} total bytes ({}kB)",
        capacity - used,
        capacity / 1024
    );

    image.pad();
    Ok(image.into_bytes())
}
