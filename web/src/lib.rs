use clap::Parser;
use wasm_bindgen::prelude::*;

mod audio;
mod game;
mod scores;
mod settings;
mod theme;
mod utils;

/// Arguments read from the location hash, e.g. `#-vv&--seed=42&--level=hard`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    game: game::GameProps,
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("args: {:?}", args.game);

    theme::Theme::init();

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, args.game).render();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(hash: &str) -> Args {
        Args::try_parse_from(hash.split(['#', '&'])).unwrap()
    }

    #[test]
    fn empty_hash_uses_defaults() {
        let args = parse("");
        assert_eq!(args.verbose.log_level(), Some(log::Level::Error));
    }

    #[test]
    fn hash_arguments_are_split_on_ampersands() {
        let args = parse("#-vv&--seed=42&--level=hard");

        assert_eq!(args.verbose.log_level(), Some(log::Level::Info));
        assert_eq!(format!("{:?}", args.game), "GameProps { seed: Some(42), level: Some(Hard) }");
    }

    #[test]
    fn unknown_level_is_rejected() {
        assert!(Args::try_parse_from("#--level=legendary".split(['#', '&'])).is_err());
    }
}
