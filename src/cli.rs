//! Command-line interface: `translate`, `hist` and `configure`.
//!
//! Each command reads the config fresh from disk. Handlers write to a caller
//! supplied writer so they can be driven from tests.

use crate::config::{self, Config, ConfigUpdate};
use crate::histogram::Histogram;
use crate::lang;
use crate::mt::{
    DEEPL_AUTH_KEY, DeepLProvider, Formality, MachineTranslator, SplitSentences, TranslateOptions,
};
use crate::session::{CountedTranslation, SessionRequest, TranslationSession};
use anyhow::{Context, Result, bail};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use std::io::{Read, Write};
use std::path::PathBuf;
use tracing::debug;

fn config_file_arg() -> Arg {
    Arg::new("config-file")
        .long("config-file")
        .help(format!(
            "Configuration file path (default: {})",
            config::DEFAULT_CONFIG_FILE
        ))
        .value_parser(value_parser!(PathBuf))
}

pub fn build_cli() -> Command {
    Command::new("deepler")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Translate with DeepL and keep a histogram of the words you look up")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log what deepler is doing to stderr")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("translate")
                .about("Translate text and count its words")
                .arg(
                    Arg::new("auth-key")
                        .long("auth-key")
                        .help("Authentication key for the DeepL API")
                        .env(DEEPL_AUTH_KEY)
                        .hide_env_values(true),
                )
                .arg(
                    Arg::new("text")
                        .long("text")
                        .help("The text to be translated, '-' reads it from stdin")
                        .default_value("-"),
                )
                .arg(config_file_arg())
                .arg(
                    Arg::new("source-lang")
                        .long("source-lang")
                        .help("Language of the text to be translated")
                        .value_parser(lang::parse_source_lang),
                )
                .arg(
                    Arg::new("target-lang")
                        .long("target-lang")
                        .help("Language of the translated text")
                        .value_parser(lang::parse_target_lang),
                )
                .arg(
                    Arg::new("count-lang")
                        .long("count-lang")
                        .help(
                            "The translation is counted only if its language is this one, \
                             otherwise the input is",
                        )
                        .value_parser(lang::parse_count_lang),
                )
                .arg(
                    Arg::new("swap")
                        .long("swap")
                        .help("Swap the source lang and the target lang")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("formality")
                        .long("formality")
                        .help("Prefer less or more formal language (less, more)")
                        .value_parser(|s: &str| s.parse::<Formality>()),
                )
                .arg(
                    Arg::new("preserve-formatting")
                        .long("preserve-formatting")
                        .help("Keep the original formatting instead of correcting it")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("split-sentences")
                        .long("split-sentences")
                        .help("Sentence splitting: 0, 1 or nonewlines")
                        .value_parser(|s: &str| s.parse::<SplitSentences>()),
                ),
        )
        .subcommand(
            Command::new("hist")
                .about("Show the most frequent words")
                .arg(config_file_arg())
                .arg(
                    Arg::new("min-count")
                        .long("min-count")
                        .help("Words counted fewer times are not shown")
                        .value_parser(value_parser!(u64))
                        .default_value("0"),
                )
                .arg(
                    Arg::new("num-words")
                        .long("num-words")
                        .help("Number of words to output")
                        .value_parser(value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("configure")
                .about("Change the persistent settings")
                .arg(
                    Arg::new("ignore-add")
                        .long("ignore-add")
                        .help("Add the passed words to the ignore-list")
                        .num_args(1..)
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("ignore-delete")
                        .long("ignore-delete")
                        .help("Remove the passed words from the ignore-list")
                        .num_args(1..)
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("min-length")
                        .long("min-length")
                        .help("Words with fewer characters are not counted")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("source-lang")
                        .long("source-lang")
                        .help("Default language of the text to be translated")
                        .value_parser(lang::parse_source_lang),
                )
                .arg(
                    Arg::new("target-lang")
                        .long("target-lang")
                        .help("Default language of the translated text")
                        .value_parser(lang::parse_target_lang),
                )
                .arg(
                    Arg::new("count-lang")
                        .long("count-lang")
                        .help("Default count language")
                        .value_parser(lang::parse_count_lang),
                )
                .arg(
                    Arg::new("show")
                        .long("show")
                        .help("Print the resulting configuration")
                        .action(ArgAction::SetTrue),
                )
                .arg(config_file_arg()),
        )
}

/// Options of the `translate` command
#[derive(Debug, Clone, Default)]
pub struct TranslateArgs {
    pub auth_key: Option<String>,
    pub text: String,
    pub config_file: Option<PathBuf>,
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
    pub count_lang: Option<String>,
    pub swap: bool,
    pub options: TranslateOptions,
}

impl TranslateArgs {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        TranslateArgs {
            auth_key: matches.get_one::<String>("auth-key").cloned(),
            text: matches
                .get_one::<String>("text")
                .cloned()
                .unwrap_or_else(|| "-".to_string()),
            config_file: matches.get_one::<PathBuf>("config-file").cloned(),
            source_lang: matches.get_one::<String>("source-lang").cloned(),
            target_lang: matches.get_one::<String>("target-lang").cloned(),
            count_lang: matches.get_one::<String>("count-lang").cloned(),
            swap: matches.get_flag("swap"),
            options: TranslateOptions {
                formality: matches.get_one::<Formality>("formality").copied(),
                preserve_formatting: matches.get_flag("preserve-formatting"),
                split_sentences: matches.get_one::<SplitSentences>("split-sentences").copied(),
            },
        }
    }

    /// Fill unset languages from `config`, then swap and normalize them.
    pub fn session_request(&self, config: &Config, text: String) -> SessionRequest {
        let source = self.source_lang.as_deref().unwrap_or(&config.source_lang);
        let target = self.target_lang.as_deref().unwrap_or(&config.target_lang);
        let (source_lang, target_lang) = lang::normalize_request(source, target, self.swap);

        SessionRequest {
            text,
            source_lang,
            target_lang,
            count_lang: self
                .count_lang
                .clone()
                .unwrap_or_else(|| config.count_lang.clone()),
            config_file: self.config_file.clone(),
        }
    }
}

/// Run `translate` against `translator`, reading the text from `input`
/// when it is `-`.
pub async fn translate<T: MachineTranslator + ?Sized>(
    args: &TranslateArgs,
    translator: &T,
    input: &mut dyn Read,
    out: &mut dyn Write,
) -> Result<CountedTranslation> {
    let config = Config::load(args.config_file.as_deref())?;

    let text = if args.text == "-" {
        let mut buf = String::new();
        input
            .read_to_string(&mut buf)
            .context("Failed to read text from stdin")?;
        buf
    } else {
        args.text.clone()
    };

    let request = args.session_request(&config, text);
    debug!(
        source = %request.source_lang,
        target = %request.target_lang,
        count = %request.count_lang,
        "effective languages"
    );

    let result = TranslationSession::new(translator).translate(&request).await?;

    writeln!(out, "input text({})", result.source_lang)?;
    writeln!(out, "{}", result.source_text)?;
    writeln!(out)?;
    writeln!(out, "output text({})", result.target_lang)?;
    writeln!(out, "{}", result.result_text)?;
    writeln!(out)?;
    Ok(result)
}

/// Print the `num_words` most frequent words with a count of at least `min_count`.
pub fn hist(
    config_file: Option<PathBuf>,
    min_count: u64,
    num_words: Option<usize>,
    out: &mut dyn Write,
) -> Result<()> {
    let config = Config::load(config_file.as_deref())?;
    let histogram = Histogram::load(&config)?;
    for (word, count) in histogram.most_common(num_words) {
        if count >= min_count {
            writeln!(out, "{}\t{}", word, count)?;
        }
    }
    Ok(())
}

/// Apply `update` to the config and print it when `show` is set.
pub fn configure(
    config_file: Option<PathBuf>,
    update: &ConfigUpdate,
    show: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let config = config::update(config_file.as_deref(), update)?;
    if show {
        writeln!(out, "{}", config.dump()?)?;
    }
    Ok(())
}

fn strings(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

/// Dispatch parsed arguments to the matching command.
pub async fn run(matches: &ArgMatches, input: &mut dyn Read, out: &mut dyn Write) -> Result<()> {
    match matches.subcommand() {
        Some(("translate", sub)) => {
            let args = TranslateArgs::from_matches(sub);
            let auth_key = match args.auth_key.as_deref().map(str::trim) {
                Some(key) if !key.is_empty() => key.to_string(),
                _ => bail!(
                    "No DeepL auth key: pass --auth-key or set {}",
                    DEEPL_AUTH_KEY
                ),
            };
            let provider = DeepLProvider::new(auth_key)?.with_options(args.options.clone());
            translate(&args, &provider, input, out).await?;
        }
        Some(("hist", sub)) => {
            hist(
                sub.get_one::<PathBuf>("config-file").cloned(),
                sub.get_one::<u64>("min-count").copied().unwrap_or(0),
                sub.get_one::<usize>("num-words").copied(),
                out,
            )?;
        }
        Some(("configure", sub)) => {
            let update = ConfigUpdate {
                ignore_add: strings(sub, "ignore-add"),
                ignore_delete: strings(sub, "ignore-delete"),
                min_length: sub.get_one::<usize>("min-length").copied(),
                source_lang: sub.get_one::<String>("source-lang").cloned(),
                target_lang: sub.get_one::<String>("target-lang").cloned(),
                count_lang: sub.get_one::<String>("count-lang").cloned(),
            };
            configure(
                sub.get_one::<PathBuf>("config-file").cloned(),
                &update,
                sub.get_flag("show"),
                out,
            )?;
        }
        _ => unreachable!("subcommand_required is set"),
    }
    Ok(())
}
