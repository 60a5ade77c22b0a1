use std::env;

pub(crate) const DEFAULT_FPS: u64 = 60;
pub(crate) const DEFAULT_STARS: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Options {
    pub(crate) fps: u64,
    pub(crate) stars: usize,
    // 0 means seed from the clock
    pub(crate) seed: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            stars: DEFAULT_STARS,
            seed: 0,
        }
    }
}

pub(crate) enum Parsed {
    Run(Options),
    Help,
}

pub(crate) fn parse(it: impl Iterator<Item = String>) -> Parsed {
    let mut opts = Options::default();
    let mut it = it;
    while let Some(a) = it.next() {
        match a.as_str() {
            "--fps" => {
                if let Some(v) = it.next() {
                    opts.fps = v.parse().unwrap_or(opts.fps);
                }
            }
            "--stars" => {
                if let Some(v) = it.next() {
                    opts.stars = v.parse().unwrap_or(opts.stars);
                }
            }
            "--seed" => {
                if let Some(v) = it.next() {
                    opts.seed = v.parse().unwrap_or(opts.seed);
                }
            }
            "--help" | "-h" => return Parsed::Help,
            _ => {}
        }
    }
    Parsed::Run(opts)
}

pub(crate) fn parse_args() -> Options {
    match parse(env::args().skip(1)) {
        Parsed::Run(opts) => opts,
        Parsed::Help => {
            println!(
                "solarium\n\n\
                 Usage:\n\
                 \tsolarium [--fps N] [--stars N] [--seed N]\n\n\
                 Controls:\n\
                 \tQ / Esc quit\n\
                 \tSpace pause\n\
                 \tR reseed layout and starfield\n"
            );
            std::process::exit(0);
        }
    }
}
