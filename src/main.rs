//! Tile Platformer headless driver
//!
//! Loads a level, runs the simulation at a fixed timestep with a seeded
//! autopilot standing in for the keyboard, and logs what happens.
//!
//! Usage: `tile-platformer [LEVEL.json] [--tuning TUNING.json] [--frames N] [--seed S]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use anyhow::{Context, Result, bail};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use tile_platformer::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
    use tile_platformer::sim::{GameState, TickInput, tick};
    use tile_platformer::{Level, Tuning, level};

    /// Frame time the driver pretends the host renders at
    const FRAME_DT: f32 = 1.0 / 60.0;

    const USAGE: &str =
        "usage: tile-platformer [LEVEL.json] [--tuning TUNING.json] [--frames N] [--seed S]";

    struct Options {
        level: Option<String>,
        tuning: Option<String>,
        frames: u32,
        seed: u64,
    }

    fn parse_args() -> Result<Options> {
        let mut opts = Options {
            level: None,
            tuning: None,
            frames: 1200,
            seed: 12345,
        };

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--frames" => {
                    let value = args.next().context("--frames needs a value")?;
                    opts.frames = value
                        .parse()
                        .with_context(|| format!("invalid frame count: {value}"))?;
                }
                "--seed" => {
                    let value = args.next().context("--seed needs a value")?;
                    opts.seed = value
                        .parse()
                        .with_context(|| format!("invalid seed: {value}"))?;
                }
                "--tuning" => {
                    opts.tuning = Some(args.next().context("--tuning needs a path")?);
                }
                "-h" | "--help" => {
                    println!("{USAGE}");
                    std::process::exit(0);
                }
                other if other.starts_with('-') => bail!("unknown option {other}\n{USAGE}"),
                other => opts.level = Some(other.to_string()),
            }
        }

        Ok(opts)
    }

    /// Seeded stand-in for a player at the keyboard
    ///
    /// Picks an action and holds it for a random number of ticks. Holding
    /// jump and then switching action releases the key, which fires the jump.
    struct Autopilot {
        rng: Pcg32,
        input: TickInput,
        hold_ticks: u32,
    }

    impl Autopilot {
        fn new(seed: u64) -> Self {
            Self {
                rng: Pcg32::seed_from_u64(seed),
                input: TickInput::default(),
                hold_ticks: 0,
            }
        }

        fn next_input(&mut self) -> TickInput {
            if self.hold_ticks == 0 {
                self.input = self.pick();
                self.hold_ticks = self.rng.random_range(10..90);
            } else {
                self.hold_ticks -= 1;
            }
            self.input
        }

        fn pick(&mut self) -> TickInput {
            let mut input = TickInput::default();
            match self.rng.random_range(0..4) {
                0 => {}
                1 => input.left = true,
                2 => input.right = true,
                _ => {
                    input.jump_held = true;
                    input.left = self.rng.random_bool(0.3);
                    input.right = !input.left && self.rng.random_bool(0.4);
                }
            }
            // Ball only
            input.up = self.rng.random_bool(0.2);
            input.down = !input.up && self.rng.random_bool(0.2);
            input
        }
    }

    /// Driver-side game instance
    struct Game {
        state: GameState,
        autopilot: Autopilot,
        accumulator: f32,
        landings: u32,
        highest_y: f32,
    }

    impl Game {
        fn new(state: GameState, seed: u64) -> Self {
            let highest_y = state.player.body.center.y;
            Self {
                state,
                autopilot: Autopilot::new(seed),
                accumulator: 0.0,
                landings: 0,
                highest_y,
            }
        }

        /// Run simulation ticks for one host frame
        fn update(&mut self, dt: f32) {
            let dt = dt.min(MAX_FRAME_DT);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.autopilot.next_input();
                let was_grounded = self.state.player.is_grounded();
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                if !was_grounded && self.state.player.is_grounded() {
                    self.landings += 1;
                }
                self.highest_y = self.highest_y.min(self.state.player.body.center.y);
            }
        }
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let opts = parse_args()?;

        let level = match &opts.level {
            Some(path) => Level::load(path).with_context(|| format!("loading level {path}"))?,
            None => level::builtin().context("building the built-in level")?,
        };
        let tuning = match &opts.tuning {
            Some(path) => Tuning::load(path).with_context(|| format!("loading tuning {path}"))?,
            None => Tuning::default(),
        };

        log::info!(
            "Tile Platformer starting: {} screens, {} frames, seed {}",
            level.screen_count(),
            opts.frames,
            opts.seed
        );

        let mut game = Game::new(GameState::new(level, tuning), opts.seed);
        for _ in 0..opts.frames {
            game.update(FRAME_DT);
        }

        log::info!(
            "Finished after {} ticks: {} landings, highest y {:.2}",
            game.state.time_ticks,
            game.landings,
            game.highest_y
        );
        for line in game.state.debug_lines() {
            println!("{line}");
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is driven by the host on the web; nothing to run here
}
