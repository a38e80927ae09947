use anyhow::Context;
use clap::Parser;

use crate::image::CartKind;

fn parse_rom_size(input: &str) -> Result<u32, String> {
    match input.trim() {
        "128" => Ok(128 * 1024),
        "256" => Ok(256 * 1024),
        "512" => Ok(512 * 1024),
        "1024" => Ok(1024 * 1024),
        _ => Err(format!(
            "invalid ROM size '{input}', expected 128, 256, 512 or 1024"
        )),
    }
}

fn parse_cart_kind(input: &str) -> Result<CartKind, String> {
    match input.trim() {
        "0" => Ok(CartKind::MegaCart),
        "1" => Ok(CartKind::MultiCart),
        _ => Err(format!("invalid cart type '{input}', expected 0 or 1")),
    }
}

/// One input file together with the generation toggle state at the argv
/// position where it was specified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: String,
    pub extended: bool,
}

#[derive(Debug, Parser)]
#[command(
    name = "megacart",
    version,
    about = "Builds a TV Computer cartridge ROM image from program files"
)]
pub struct Args {
    /// Output ROM image path.
    #[arg(short = 'o', long = "output", default_value = "MegaCart.bin")]
    pub output: String,

    /// Force compressed mode from the start instead of switching to it
    /// only when the files do not fit.
    #[arg(short = 'c', long = "compressed")]
    pub compressed: bool,

    /// ROM size in kilobytes: 128, 256, 512 or 1024.
    #[arg(short = 's', long = "size", value_name = "KB", value_parser = parse_rom_size, default_value = "1024")]
    pub rom_size: u32,

    /// Cartridge type: 0 for megacart, 1 for multicart.
    #[arg(short = 't', long = "cart", value_name = "TYPE", value_parser = parse_cart_kind, default_value = "0")]
    pub cart: CartKind,

    /// Tag all files specified after this switch for the extended (2.x)
    /// directory generation.
    #[arg(short = '2', long = "extended")]
    pub extended: bool,

    /// Read additional file names from a list file, one per line.
    #[arg(short = 'f', long = "filelist", value_name = "LIST")]
    pub filelists: Vec<String>,

    #[arg(value_name = "FILE")]
    pub inputs: Vec<String>,

    #[arg(skip)]
    pub entries: Vec<FileEntry>,
}

/// Second pass over the raw argv. The `-2` toggle and `-f` list files
/// are order sensitive relative to the positional file names, which clap
/// cannot express, so the ordered entry list is rebuilt here after clap
/// has validated the flags.
pub fn finalize_inputs(args: &mut Args, argv: &[String]) -> anyhow::Result<()> {
    let mut extended = false;
    let mut entries = Vec::new();
    let mut iter = argv.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-2" | "--extended" => extended = true,
            "-c" | "--compressed" => {}
            "-o" | "--output" | "-s" | "--size" | "-t" | "--cart" => {
                iter.next();
            }
            "-f" | "--filelist" => {
                if let Some(list) = iter.next() {
                    collect_list_entries(list, extended, &mut entries)?;
                }
            }
            other if other.starts_with('-') => {}
            path => push_entry(path, extended, &mut entries),
        }
    }

    args.entries = entries;
    Ok(())
}

fn collect_list_entries(
    list: &str,
    extended: bool,
    entries: &mut Vec<FileEntry>,
) -> anyhow::Result<()> {
    let text =
        std::fs::read_to_string(list).with_context(|| format!("cannot open file list {list}"))?;
    for line in text.lines() {
        push_entry(line, extended, entries);
    }
    Ok(())
}

fn push_entry(raw: &str, extended: bool, entries: &mut Vec<FileEntry>) {
    let path = raw.trim();
    if path.is_empty() {
        return;
    }
    entries.push(FileEntry {
        path: path.to_string(),
        extended,
    });
}

#[cfg(test)]
mod tests {
    use super::{finalize_inputs, parse_cart_kind, parse_rom_size, Args, FileEntry};
    use crate::image::CartKind;
    use clap::Parser;
    use std::io::Write;

    fn argv(parts: &[&str]) -> Vec<String> {
        std::iter::once("megacart")
            .chain(parts.iter().copied())
            .map(str::to_string)
            .collect()
    }

    fn parse(parts: &[&str]) -> Args {
        let argv = argv(parts);
        let mut args = Args::parse_from(argv.iter().cloned());
        finalize_inputs(&mut args, &argv).expect("finalize");
        args
    }

    #[test]
    fn rom_sizes_map_to_byte_capacities() {
        assert_eq!(parse_rom_size("128"), Ok(128 * 1024));
        assert_eq!(parse_rom_size("1024"), Ok(1024 * 1024));
        assert!(parse_rom_size("640").is_err());
    }

    #[test]
    fn cart_kinds_parse_from_their_numeric_codes() {
        assert_eq!(parse_cart_kind("0"), Ok(CartKind::MegaCart));
        assert_eq!(parse_cart_kind("1"), Ok(CartKind::MultiCart));
        assert!(parse_cart_kind("2").is_err());
    }

    #[test]
    fn extended_toggle_tags_only_later_entries() {
        let args = parse(&["first.cas", "-2", "second.cas", "third.cas"]);
        assert_eq!(
            args.entries,
            vec![
                FileEntry { path: "first.cas".into(), extended: false },
                FileEntry { path: "second.cas".into(), extended: true },
                FileEntry { path: "third.cas".into(), extended: true },
            ]
        );
    }

    #[test]
    fn option_values_are_not_mistaken_for_file_names() {
        let args = parse(&["-o", "out.bin", "-s", "256", "a.cas", "-t", "1", "b.cas"]);
        assert_eq!(args.output, "out.bin");
        assert_eq!(args.rom_size, 256 * 1024);
        assert_eq!(args.cart, CartKind::MultiCart);
        assert_eq!(
            args.entries.iter().map(|e| e.path.as_str()).collect::<Vec<_>>(),
            vec!["a.cas", "b.cas"]
        );
    }

    #[test]
    fn list_files_inherit_the_toggle_state_at_their_position() {
        let dir = tempfile::tempdir().expect("tempdir");
        let legacy_list = dir.path().join("legacy.txt");
        let extended_list = dir.path().join("extended.txt");
        let mut file = std::fs::File::create(&legacy_list).expect("create");
        writeln!(file, "one.cas\n  two.cas  \n\n").expect("write");
        let mut file = std::fs::File::create(&extended_list).expect("create");
        writeln!(file, "three.cas").expect("write");

        let args = parse(&[
            "-f",
            legacy_list.to_str().expect("utf8 path"),
            "-2",
            "-f",
            extended_list.to_str().expect("utf8 path"),
        ]);
        assert_eq!(
            args.entries,
            vec![
                FileEntry { path: "one.cas".into(), extended: false },
                FileEntry { path: "two.cas".into(), extended: false },
                FileEntry { path: "three.cas".into(), extended: true },
            ]
        );
    }

    #[test]
    fn missing_list_file_is_an_error() {
        let argv = argv(&["-f", "does-not-exist.txt"]);
        let mut args = Args::parse_from(argv.iter().cloned());
        let err = finalize_inputs(&mut args, &argv).expect_err("must fail");
        assert!(err.to_string().contains("does-not-exist.txt"));
    }
}
