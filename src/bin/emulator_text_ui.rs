use clap::{Parser, ValueEnum};
use crossbeam_channel::{bounded, Receiver, TryRecvError};
use cursive::{views::Dialog, CbSink, Cursive};
use log::LevelFilter;
use std::error::Error as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chippy::chip::{
    chip8::{cursive_display, Chip8},
    load_program_file, Chip, ChipWithCursiveDisplay, ExecutionError, LoadProgramError, Profile,
    Signal,
};

/// Frames are rendered at 60Hz.
const FRAME: Duration = Duration::from_micros(16_667);

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProfileArg {
    Schip,
    XoChip,
    XoChipStretched,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Schip => Profile::Schip,
            ProfileArg::XoChip => Profile::XoChip,
            ProfileArg::XoChipStretched => Profile::XoChipStretched,
        }
    }
}

/// Runs a SCHIP or XO-CHIP program in the terminal.
#[derive(Debug, Parser)]
#[command(name = "chippy", version)]
struct Args {
    /// Path to the program image.
    rom: PathBuf,

    /// Instruction set variant to emulate.
    #[arg(long, value_enum, default_value_t = ProfileArg::XoChip)]
    profile: ProfileArg,

    /// Instructions executed per 60Hz frame.
    #[arg(long, default_value_t = 200, value_parser = clap::value_parser!(u32).range(1..))]
    cycles_per_frame: u32,

    /// Frames a key stays pressed after its key event. Terminals do not
    /// report key releases.
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u32).range(1..))]
    key_hold_frames: u32,

    /// Treat the exit instruction as a no-op.
    #[arg(long)]
    no_exit: bool,
}

/// Represents an event to be processed by the event loop. It is generic
/// over the type representing the pressed key.
enum Event<T> {
    /// Occurs when the key passed in the enum value was pressed. The key is
    /// held for a fixed number of frames.
    Key(T),

    /// Releases all keys right away.
    KeyRelease,

    /// Runs more cycles per frame.
    SpeedUp,

    /// Runs fewer cycles per frame.
    SlowDown,

    /// Shut down.
    Quit,
}

/// Represents the channels available to the event loop. It is generic
/// over the type representing the pressed keys.
struct EventLoopChannels<T> {
    /// The channel to send the UI refresh messages to.
    gfx_sender: CbSink,

    /// The channel on which the Events are received.
    key_receiver: Receiver<Event<T>>,
}

/// How the event loop paces the chip.
#[derive(Debug, Clone, Copy)]
struct FramePolicy {
    cycles_per_frame: u32,
    key_hold_frames: u32,
}

/// Runs one frame worth of cycles. Only the last cycle lets the timers
/// decay, by the time that actually passed since the previous frame.
fn run_frame<T: Chip>(chip: &mut T, cycles: u32, elapsed: f64) -> Result<Signal, ExecutionError> {
    for cycle in 0..cycles {
        let elapsed = if cycle + 1 == cycles { elapsed } else { 0.0 };
        if chip.cycle(elapsed)? == Signal::Exit {
            return Ok(Signal::Exit);
        }
    }
    Ok(Signal::Continue)
}

/// The event loop. Once per frame: (1) process all pending events.
/// (2) Run the cycles of the frame. (3) Update the UI. (4) Release keys that
/// were held long enough. (5) Sleep until the next frame. Returns the chip
/// once the program exits or a quit event arrives.
fn event_loop<T, P>(mut chip: T, io_channels: EventLoopChannels<P>, mut policy: FramePolicy) -> T
where
    T: Chip<PinAddress = P> + ChipWithCursiveDisplay,
    P: Copy + PartialEq,
{
    let mut held_keys: Vec<(P, u32)> = Vec::new();
    let mut tone_shown = false;
    let mut halted = false;
    let mut last_frame = Instant::now();

    loop {
        loop {
            match io_channels.key_receiver.try_recv() {
                Ok(Event::Key(key)) => {
                    chip.set_input_pin(key, true);
                    held_keys.retain(|(held, _)| *held != key);
                    held_keys.push((key, policy.key_hold_frames));
                }
                Ok(Event::KeyRelease) => {
                    chip.reset_input_pins();
                    held_keys.clear();
                }
                Ok(Event::SpeedUp) => {
                    policy.cycles_per_frame += (policy.cycles_per_frame / 10).max(1);
                    log::info!("{} cycles per frame", policy.cycles_per_frame);
                }
                Ok(Event::SlowDown) => {
                    policy.cycles_per_frame =
                        (policy.cycles_per_frame - policy.cycles_per_frame / 10).max(1);
                    log::info!("{} cycles per frame", policy.cycles_per_frame);
                }
                Ok(Event::Quit) | Err(TryRecvError::Disconnected) => return chip,
                Err(TryRecvError::Empty) => break,
            }
        }

        let frame_start = Instant::now();
        let elapsed = frame_start.duration_since(last_frame).as_secs_f64();
        last_frame = frame_start;

        if !halted {
            match run_frame(&mut chip, policy.cycles_per_frame, elapsed) {
                Ok(Signal::Continue) => {}
                Ok(Signal::Exit) => {
                    chip.update_ui(&io_channels.gfx_sender);
                    let _ = io_channels.gfx_sender.send(Box::new(|s: &mut Cursive| s.quit()));
                    return chip;
                }
                Err(error) => {
                    log::error!("{}", error);
                    let message = error.to_string();
                    let _ = io_channels.gfx_sender.send(Box::new(move |s: &mut Cursive| {
                        s.add_layer(Dialog::info(message).title("Execution halted"));
                    }));
                    halted = true;
                }
            }

            chip.update_ui(&io_channels.gfx_sender);

            let tone = chip.tone_active();
            if tone != tone_shown {
                tone_shown = tone;
                let _ = io_channels
                    .gfx_sender
                    .send(Box::new(move |s: &mut Cursive| {
                        cursive_display::show_tone(s, tone)
                    }));
            }

            for (key, frames) in held_keys.iter_mut() {
                *frames -= 1;
                if *frames == 0 {
                    chip.set_input_pin(*key, false);
                }
            }
            held_keys.retain(|(_, frames)| *frames > 0);
        }

        std::thread::sleep(FRAME.saturating_sub(frame_start.elapsed()));
    }
}

/// `<rom>.flags`, next to the program image.
fn flags_path(rom: &Path) -> PathBuf {
    let mut path = rom.as_os_str().to_owned();
    path.push(".flags");
    PathBuf::from(path)
}

/// Seeds the flag store from a previous run, if there was one.
fn restore_flags(chip8: &mut Chip8, path: &Path) {
    if chip8.flags().is_none() {
        return;
    }
    match fs::read(path) {
        Ok(bytes) => {
            log::info!("restoring flags from {}", path.display());
            chip8.seed_flags(&bytes);
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => log::warn!("could not read flags from {}: {}", path.display(), e),
    }
}

fn persist_flags(chip8: &Chip8, path: &Path) -> io::Result<()> {
    match chip8.flags() {
        Some(flags) => fs::write(path, flags),
        None => Ok(()),
    }
}

/// Loads the program named by `args` into a chip configured by `args`.
fn load_chip(args: &Args) -> Result<Chip8, LoadProgramError> {
    let program = load_program_file(&args.rom)?;
    let mut chip8 = Chip8::new(&program, args.profile.into())?;
    chip8.set_ignore_exit(args.no_exit);
    restore_flags(&mut chip8, &flags_path(&args.rom));
    Ok(chip8)
}

/// Constructs the UI and spawns the event loop and the UI thread.
fn main() {
    let args = Args::parse();

    cursive::logger::init();
    log::set_max_level(LevelFilter::Debug);

    let chip8 = match load_chip(&args) {
        Ok(chip8) => chip8,
        Err(e) => {
            match e.source() {
                Some(source) => eprintln!("{}: {}", e, source),
                None => eprintln!("{}", e),
            }
            std::process::exit(1);
        }
    };

    let mut siv = cursive::default();

    let cb_sink = siv.cb_sink().clone();
    let (key_sender, key_receiver) = bounded::<Event<u8>>(10);
    let policy = FramePolicy {
        cycles_per_frame: args.cycles_per_frame,
        key_hold_frames: args.key_hold_frames,
    };

    let emulation = std::thread::spawn(move || {
        event_loop(
            chip8,
            EventLoopChannels {
                gfx_sender: cb_sink,
                key_receiver,
            },
            policy,
        )
    });

    let sender = key_sender.clone();
    siv.add_global_callback(cursive::event::Key::Esc, move |s| {
        let _ = sender.send(Event::Quit);
        s.quit();
    });

    for (i, j) in &[
        ('1', 0x1),
        ('2', 0x2),
        ('3', 0x3),
        ('4', 0xC),
        ('q', 0x4),
        ('w', 0x5),
        ('e', 0x6),
        ('r', 0xD),
        ('a', 0x7),
        ('s', 0x8),
        ('d', 0x9),
        ('f', 0xE),
        ('z', 0xA),
        ('x', 0x0),
        ('c', 0xB),
        ('v', 0xF),
    ] {
        let sender = key_sender.clone();
        let key = *j as u8;
        siv.add_global_callback(*i, move |_s| {
            let _ = sender.send(Event::Key(key));
        });
    }

    let sender = key_sender.clone();
    siv.add_global_callback(' ', move |_s| {
        let _ = sender.send(Event::KeyRelease);
    });

    let sender = key_sender.clone();
    siv.add_global_callback(cursive::event::Key::Up, move |_s| {
        let _ = sender.send(Event::SpeedUp);
    });

    let sender = key_sender.clone();
    siv.add_global_callback(cursive::event::Key::Down, move |_s| {
        let _ = sender.send(Event::SlowDown);
    });

    siv.add_global_callback('~', Cursive::toggle_debug_console);

    siv.add_layer(cursive_display::screen());

    siv.run();

    // The loop may still be running if the UI was closed some other way.
    let _ = key_sender.send(Event::Quit);
    match emulation.join() {
        Ok(chip8) => {
            let path = flags_path(&args.rom);
            if let Err(e) = persist_flags(&chip8, &path) {
                eprintln!("could not write flags to {}: {}", path.display(), e);
            }
        }
        Err(_) => eprintln!("emulation thread panicked"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_path_appends_suffix() {
        assert_eq!(
            flags_path(Path::new("roms/game.ch8")),
            PathBuf::from("roms/game.ch8.flags")
        );
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["chippy", "game.ch8"]).unwrap();
        assert!(matches!(args.profile, ProfileArg::XoChip));
        assert_eq!(args.cycles_per_frame, 200);
        assert_eq!(args.key_hold_frames, 6);
        assert!(!args.no_exit);
    }

    #[test]
    fn test_args_reject_zero_cycles() {
        assert!(Args::try_parse_from(["chippy", "game.ch8", "--cycles-per-frame", "0"]).is_err());
    }

    #[test]
    fn test_run_frame_stops_at_exit() {
        // 00FD right away, then an endless loop that would never return
        let mut chip8 = Chip8::new(&[0x00, 0xFD, 0x12, 0x02], Profile::XoChip).unwrap();
        assert_eq!(run_frame(&mut chip8, 200, 1.0).unwrap(), Signal::Exit);
        assert_eq!(chip8.program_counter(), 0x200);
    }

    #[test]
    fn test_run_frame_decays_timers_once() {
        // V0 = 60, delay = V0, then spin
        let mut chip8 = Chip8::new(&[0x60, 0x3C, 0xF0, 0x15, 0x12, 0x04], Profile::Schip).unwrap();
        run_frame(&mut chip8, 2, 0.5).unwrap();
        assert_eq!(chip8.timer(chippy::chip::chip8::Timer::Delay), 30);
    }
}
