use clap::{ArgAction, ArgMatches, Parser};
use std::path::PathBuf;

use crate::writer::igrab::IGrabVersion;

/// Header generator for ID-engine (Keen: Galaxy) games.
///
/// Outputs are written in command-line order. `--igrab-version` and
/// `--igrab-underscore-separator` only affect IGRAB outputs listed after them.
#[derive(Parser, Debug)]
#[command(name = "idgrab", author, version, about)]
pub struct Cli {
    /// idGrab script describing the graphics chunk layout
    pub script: PathBuf,

    /// Generate a GFXINFO(E) file for use with TED or Omnispeak
    #[arg(long, value_name = "FILE")]
    pub gfxinfo: Vec<PathBuf>,

    /// Write a modid/ugrab compatible .def file
    #[arg(long, value_name = "FILE")]
    pub modid: Vec<PathBuf>,

    /// Generate an omnispeak-compatible GFXCHUNKS variable file
    #[arg(long, value_name = "FILE")]
    pub omnispeak: Vec<PathBuf>,

    /// Create a GRAPHEXT/GFXE_EXT C header file
    #[arg(long = "igrab-header", value_name = "FILE")]
    pub igrab_header: Vec<PathBuf>,

    /// Create a GRAPHEXT/GFXE_EXT assembly (.EQU) header
    #[arg(long = "igrab-asm", value_name = "FILE")]
    pub igrab_asm: Vec<PathBuf>,

    /// Dump the allocated chunk table as JSON
    #[arg(long, value_name = "FILE")]
    pub json: Vec<PathBuf>,

    /// Emulate the output from a specific IGRAB version (0.24 or 0.4)
    #[arg(long = "igrab-version", value_name = "VERSION", value_parser = parse_igrab_version)]
    pub igrab_version: Vec<IGrabVersion>,

    /// Add an underscore before chunk name suffixes (e.g. _SPR)
    // One value per occurrence, so every occurrence keeps its own index.
    #[arg(
        long = "igrab-underscore-separator",
        action = ArgAction::Append,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub igrab_underscore_separator: Vec<bool>,
}

fn parse_igrab_version(s: &str) -> Result<IGrabVersion, String> {
    s.parse()
}

/// One step of the run, in the order given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    GfxInfo(PathBuf),
    ModId(PathBuf),
    Omnispeak(PathBuf),
    IGrabHeader(PathBuf),
    IGrabAsm(PathBuf),
    Json(PathBuf),
    SetIGrabVersion(IGrabVersion),
    EnableUnderscoreSeparator,
}

/// Rebuild the interleaved order of output and option flags, which the
/// derived `Cli` loses by grouping values per flag.
pub fn ordered_actions(matches: &ArgMatches) -> Vec<Action> {
    let mut indexed = Vec::<(usize, Action)>::new();

    collect_paths(matches, "gfxinfo", Action::GfxInfo, &mut indexed);
    collect_paths(matches, "modid", Action::ModId, &mut indexed);
    collect_paths(matches, "omnispeak", Action::Omnispeak, &mut indexed);
    collect_paths(matches, "igrab_header", Action::IGrabHeader, &mut indexed);
    collect_paths(matches, "igrab_asm", Action::IGrabAsm, &mut indexed);
    collect_paths(matches, "json", Action::Json, &mut indexed);

    if let (Some(values), Some(indices)) = (
        matches.get_many::<IGrabVersion>("igrab_version"),
        matches.indices_of("igrab_version"),
    ) {
        indexed.extend(indices.zip(values.map(|v| Action::SetIGrabVersion(*v))));
    }

    if let (Some(values), Some(indices)) = (
        matches.get_many::<bool>("igrab_underscore_separator"),
        matches.indices_of("igrab_underscore_separator"),
    ) {
        indexed.extend(
            indices
                .zip(values)
                .filter(|(_, enabled)| **enabled)
                .map(|(index, _)| (index, Action::EnableUnderscoreSeparator)),
        );
    }

    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, action)| action).collect()
}

fn collect_paths(
    matches: &ArgMatches,
    id: &str,
    action: fn(PathBuf) -> Action,
    out: &mut Vec<(usize, Action)>,
) {
    if let (Some(values), Some(indices)) = (matches.get_many::<PathBuf>(id), matches.indices_of(id)) {
        out.extend(indices.zip(values.map(|p| action(p.clone()))));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn actions(args: &[&str]) -> Vec<Action> {
        let matches = Cli::command().try_get_matches_from(args).unwrap();
        ordered_actions(&matches)
    }

    #[test]
    fn test_actions_keep_command_line_order() {
        let got = actions(&[
            "idgrab",
            "ck4.idg",
            "--igrab-header",
            "a.h",
            "--igrab-version",
            "0.24",
            "--igrab-underscore-separator",
            "--igrab-header",
            "b.h",
            "--gfxinfo",
            "GFXINFOE.CK4",
        ]);
        assert_eq!(
            got,
            vec![
                Action::IGrabHeader("a.h".into()),
                Action::SetIGrabVersion(IGrabVersion::ZeroPointTwoFour),
                Action::EnableUnderscoreSeparator,
                Action::IGrabHeader("b.h".into()),
                Action::GfxInfo("GFXINFOE.CK4".into()),
            ]
        );

        let got = actions(&[
            "idgrab",
            "ck4.idg",
            "--igrab-header",
            "a.h",
            "--igrab-underscore-separator",
            "--igrab-header",
            "b.h",
            "--igrab-underscore-separator",
            "--igrab-header",
            "c.h",
        ]);
        assert_eq!(
            got,
            vec![
                Action::IGrabHeader("a.h".into()),
                Action::EnableUnderscoreSeparator,
                Action::IGrabHeader("b.h".into()),
                Action::EnableUnderscoreSeparator,
                Action::IGrabHeader("c.h".into()),
            ]
        );
    }

    #[test]
    fn test_bad_version_is_rejected() {
        let res = Cli::command().try_get_matches_from(["idgrab", "s", "--igrab-version", "1.0"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_script_is_required() {
        assert!(Cli::command().try_get_matches_from(["idgrab"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
