//! Shadow Kong headless runner
//!
//! Loads a level config and plays the whole campaign with a seeded random
//! input driver, logging what happens. No window is opened.
//!
//! Usage: `shadow-kong <config.json> [seed] [start-level]`

#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use shadow_kong::TickInput;

    /// Holds a direction for a while, jumping and firing now and then
    pub struct Autoplay {
        rng: Pcg32,
        held: TickInput,
        hold_ticks: u32,
    }

    impl Autoplay {
        pub fn new(seed: u64) -> Self {
            Self {
                rng: Pcg32::seed_from_u64(seed),
                held: TickInput::default(),
                hold_ticks: 0,
            }
        }

        pub fn next_input(&mut self) -> TickInput {
            if self.hold_ticks == 0 {
                let rightward = self.rng.random_bool(0.7);
                self.held = TickInput {
                    right: rightward,
                    left: !rightward,
                    up: self.rng.random_bool(0.2),
                    down: self.rng.random_bool(0.1),
                    ..Default::default()
                };
                self.hold_ticks = self.rng.random_range(10..90);
            }
            self.hold_ticks -= 1;

            TickInput {
                jump: self.rng.random_bool(0.03),
                fire: self.rng.random_bool(0.05),
                ..self.held
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use shadow_kong::render::DrawList;
    use shadow_kong::{Campaign, CampaignStatus, GameConfig};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: shadow-kong <config.json> [seed] [start-level]");
        std::process::exit(2);
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5eed_u64);
    let start_level = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .map_or(0, |n| n.saturating_sub(1));

    let config = match GameConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    let tick_cap = config.max_frames as u64 * config.levels.len() as u64 + 1;

    let mut campaign = match Campaign::starting_at(config, start_level) {
        Ok(campaign) => campaign,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    log::info!("Shadow Kong (headless) starting, seed {:#x}", seed);
    let mut driver = autoplay::Autoplay::new(seed);
    let mut frame = DrawList::new();

    for _ in 0..tick_cap {
        let input = driver.next_input();
        match campaign.advance(&input) {
            CampaignStatus::Playing => {}
            CampaignStatus::LevelCleared { next_level } => {
                log::info!("Level cleared, starting level {}", next_level + 1);
            }
            CampaignStatus::Finished(result) => {
                log::info!(
                    "{} with final score {} (levels: {:?})",
                    if result.won { "Won" } else { "Lost" },
                    result.final_score,
                    result.level_scores
                );
                println!("{}", result.final_score);
                return;
            }
        }

        frame.clear();
        campaign.round().render(&mut frame);
        log::trace!("{} draw calls", frame.len());
        for event in campaign.round().events() {
            log::debug!("frame {}: {:?}", campaign.round().frame(), event);
        }
    }

    log::warn!("Campaign still running after {} ticks", tick_cap);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser frontend; the library is driven by an embedding page
}
