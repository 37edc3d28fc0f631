// conversion.rs
use crate::app::launcher::LaunchError;
use crate::config::{Compression, ConversionOptions, CropMode};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// The source that a conversion reads from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Folder(PathBuf),
}

/// A converter invocation as an argument vector. Never passed through a shell as text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl ConversionCommand {
    pub fn build(
        converter: &str,
        source: &Source,
        destination: &Path,
        options: &ConversionOptions,
    ) -> Result<Self, LaunchError> {
        let mut args: Vec<OsString> = vec![OsString::from("convert")];
        args.extend(option_args(options));

        match source {
            Source::File(file) => {
                let target = single_file_target(file, destination)
                    .ok_or_else(|| LaunchError::MissingFileName(file.clone()))?;
                args.push(file.clone().into_os_string());
                args.push(target.into_os_string());
            }
            Source::Folder(folder) => {
                args.push(folder.clone().into_os_string());
                args.push(destination.to_path_buf().into_os_string());
            }
        }

        Ok(Self {
            program: OsString::from(converter),
            args,
        })
    }

    /// Program followed by its arguments.
    pub fn argv(&self) -> Vec<OsString> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// Human-readable command line. Quoting here is for display only.
    pub fn display_line(&self) -> String {
        self.argv()
            .iter()
            .map(|arg| quote_for_display(arg))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// `<destination>/<stem>.DNG` for a single source file.
pub fn single_file_target(source_file: &Path, destination: &Path) -> Option<PathBuf> {
    let stem = source_file.file_stem()?;
    let mut name = stem.to_os_string();
    name.push(".DNG");
    Some(destination.join(name))
}

/// dnglab flags for every option that differs from dnglab's default.
pub fn option_args(options: &ConversionOptions) -> Vec<OsString> {
    let mut args = Vec::new();
    if options.compression != Compression::Lossless {
        args.push("-c".into());
        args.push(options.compression.as_arg().into());
    }
    if !options.embed_raw {
        args.push("--embed-raw".into());
        args.push("false".into());
    }
    if !options.dng_preview {
        args.push("--dng-preview".into());
        args.push("false".into());
    }
    if !options.dng_thumbnail {
        args.push("--dng-thumbnail".into());
        args.push("false".into());
    }
    if options.crop != CropMode::Best {
        args.push("--crop".into());
        args.push(options.crop.as_arg().into());
    }
    let artist = options.artist.trim();
    if !artist.is_empty() {
        args.push("--artist".into());
        args.push(artist.into());
    }
    if options.override_existing {
        args.push("-f".into());
    }
    args
}

pub fn quote_for_display(arg: &OsStr) -> String {
    let text = arg.to_string_lossy();
    if text.is_empty() {
        return String::from("''");
    }
    let plain = text
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "_-./:=@%+,".contains(c));
    if plain {
        text.into_owned()
    } else {
        format!("'{}'", text.replace('\'', "'\\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn single_file_targets_stem_with_dng_extension() {
        let target = single_file_target(Path::new("/a/b/IMG_0001.CR3"), Path::new("/out"));
        assert_eq!(target, Some(PathBuf::from("/out/IMG_0001.DNG")));
    }

    #[test]
    fn single_file_keeps_inner_dots_of_the_name() {
        let target = single_file_target(Path::new("/a.b/IMG.0001.CR3"), Path::new("/out"));
        assert_eq!(target, Some(PathBuf::from("/out/IMG.0001.DNG")));
    }

    #[test]
    fn single_file_command() {
        let cmd = ConversionCommand::build(
            "dnglab",
            &Source::File(PathBuf::from("/a/b/IMG_0001.CR3")),
            Path::new("/out"),
            &ConversionOptions::default(),
        )
        .unwrap();
        assert_eq!(
            strings(&cmd.argv()),
            vec!["dnglab", "convert", "/a/b/IMG_0001.CR3", "/out/IMG_0001.DNG"]
        );
    }

    #[test]
    fn folder_command_passes_both_paths_unchanged() {
        let cmd = ConversionCommand::build(
            "dnglab",
            &Source::Folder(PathBuf::from("/a/b/photos")),
            Path::new("/out"),
            &ConversionOptions::default(),
        )
        .unwrap();
        assert_eq!(
            strings(&cmd.argv()),
            vec!["dnglab", "convert", "/a/b/photos", "/out"]
        );
    }

    #[test]
    fn paths_with_spaces_stay_single_arguments() {
        let cmd = ConversionCommand::build(
            "dnglab",
            &Source::Folder(PathBuf::from("/home/me/My Photos; rm -rf ~")),
            Path::new("/out dir"),
            &ConversionOptions::default(),
        )
        .unwrap();
        assert_eq!(cmd.args.len(), 3);
        assert_eq!(cmd.args[1], OsString::from("/home/me/My Photos; rm -rf ~"));
        assert_eq!(cmd.args[2], OsString::from("/out dir"));
        assert_eq!(
            cmd.display_line(),
            "dnglab convert '/home/me/My Photos; rm -rf ~' '/out dir'"
        );
    }

    #[test]
    fn source_without_file_name_is_rejected() {
        let err = ConversionCommand::build(
            "dnglab",
            &Source::File(PathBuf::from("/")),
            Path::new("/out"),
            &ConversionOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LaunchError::MissingFileName(_)));
    }

    #[test]
    fn non_default_options_become_flags_before_paths() {
        let options = ConversionOptions {
            compression: Compression::Uncompressed,
            embed_raw: false,
            dng_preview: false,
            dng_thumbnail: false,
            crop: CropMode::None,
            artist: String::from("  Jane Doe "),
            override_existing: true,
        };
        let cmd = ConversionCommand::build(
            "dnglab",
            &Source::Folder(PathBuf::from("/in")),
            Path::new("/out"),
            &options,
        )
        .unwrap();
        assert_eq!(
            strings(&cmd.args),
            vec![
                "convert",
                "-c",
                "uncompressed",
                "--embed-raw",
                "false",
                "--dng-preview",
                "false",
                "--dng-thumbnail",
                "false",
                "--crop",
                "none",
                "--artist",
                "Jane Doe",
                "-f",
                "/in",
                "/out",
            ]
        );
    }

    #[test]
    fn display_quoting() {
        assert_eq!(quote_for_display(OsStr::new("/plain/path.CR3")), "/plain/path.CR3");
        assert_eq!(quote_for_display(OsStr::new("")), "''");
        assert_eq!(quote_for_display(OsStr::new("it's")), "'it'\\''s'");
    }
}
