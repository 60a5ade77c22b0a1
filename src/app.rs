use crate::config::{self, Options};
use crate::draw::draw_scene;
use crate::layout;
use crate::render::{canvas_to_cells, Terminal};
use crate::scene::SceneState;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::Color;
use rand::{rngs::StdRng, SeedableRng};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

const MIN_COLS: u16 = 40;
const MIN_ROWS: u16 = 12;

pub(crate) struct App {
    opts: Options,
    term: Terminal,
    scene: SceneState,
    rng: StdRng,
    paused: bool,
    should_quit: bool,
}

impl App {
    fn init(opts: Options) -> Result<Self> {
        let seed = if opts.seed != 0 {
            opts.seed
        } else {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0x5EED)
                ^ 0x9E37_79B9_7F4A_7C15
        };

        let term = Terminal::begin()?;
        let mut app = Self {
            opts,
            term,
            scene: SceneState::empty(),
            rng: StdRng::seed_from_u64(seed),
            paused: false,
            should_quit: false,
        };
        app.rebuild_layout();
        Ok(app)
    }

    /// Full layout rebuild for the current terminal size. Runs at startup,
    /// on every resize, and on reseed; stale geometry never survives it.
    fn rebuild_layout(&mut self) {
        let vw = (self.term.cols as f32) * 2.0;
        let vh = (self.term.rows as f32) * 4.0;
        layout::rebuild(&mut self.scene, vw, vh, self.opts.stars, &mut self.rng);
    }

    fn handle_input(&mut self) -> Result<()> {
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(k) if k.kind == KeyEventKind::Press => match k.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        self.should_quit = true;
                    }
                    KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.should_quit = true;
                    }
                    KeyCode::Char(' ') => self.paused = !self.paused,
                    KeyCode::Char('r') | KeyCode::Char('R') => self.rebuild_layout(),
                    _ => {}
                },
                Event::Resize(cols, rows) => {
                    self.term.resize(cols, rows);
                    self.rebuild_layout();
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn run(&mut self) -> Result<()> {
        let fps = self.opts.fps.clamp(10, 240);
        let frame_dt = Duration::from_secs_f32(1.0 / fps as f32);

        while !self.should_quit {
            let frame_start = Instant::now();

            self.handle_input()?;

            if self.term.cols < MIN_COLS || self.term.rows < MIN_ROWS {
                self.term.cur.clear(Color::Black);
                self.term.cur.write_str(
                    0,
                    0,
                    "Terminal too small (need ~40x12).",
                    Color::White,
                    Color::Black,
                );
                self.term.present()?;
                std::thread::sleep(Duration::from_millis(60));
                continue;
            }

            if !self.paused {
                self.scene.tick();
            }

            draw_scene(&mut self.term.canvas, &self.scene);
            canvas_to_cells(&self.term.canvas, &mut self.term.cur, Color::Black);
            self.term.present()?;

            spin_sleep(frame_dt, frame_start);
        }
        Ok(())
    }
}

pub(crate) fn run() -> Result<()> {
    let opts = config::parse_args();
    let mut app = App::init(opts)?;
    let res = app.run();
    app.term.end()?;
    res
}

/* -----------------------------
   Frame pacing helper
------------------------------ */

fn spin_sleep(target: Duration, start: Instant) {
    let end = start + target;
    loop {
        let t = Instant::now();
        if t >= end {
            break;
        }
        let left = end - t;
        if left > Duration::from_millis(2) {
            std::thread::sleep(Duration::from_millis(1));
        } else {
            std::hint::spin_loop();
        }
    }
}
