use chippy::chip::{
    chip8::{Chip8, Timer},
    load_program_file, Chip, FaultKind, LoadProgramError, Profile, Signal,
};

fn run(chip: &mut Chip8, cycles: usize) {
    for _ in 0..cycles {
        assert_eq!(chip.cycle(0.0), Ok(Signal::Continue));
    }
}

#[test]
fn test_skip_on_equal_registers() {
    let program = [0x60, 0x05, 0x61, 0x05, 0x50, 0x10, 0x62, 0x07, 0x63, 0x08];
    let mut chip = Chip8::new(&program, Profile::XoChip).unwrap();

    run(&mut chip, 3);
    assert_eq!(chip.program_counter(), 0x208);

    run(&mut chip, 1);
    assert_eq!(chip.registers()[2], 0);
    assert_eq!(chip.registers()[3], 8);
}

#[test]
fn test_call_and_return() {
    // call 0x206, V0 = 1, spin; subroutine returns right away
    let program = [0x22, 0x06, 0x60, 0x01, 0x12, 0x04, 0x00, 0xEE];
    let mut chip = Chip8::new(&program, Profile::Schip).unwrap();

    run(&mut chip, 1);
    assert_eq!(chip.program_counter(), 0x206);
    assert_eq!(chip.stack_depth(), 1);

    run(&mut chip, 1);
    assert_eq!(chip.program_counter(), 0x202);
    assert_eq!(chip.stack_depth(), 0);

    run(&mut chip, 2);
    assert_eq!(chip.registers()[0], 1);
    assert_eq!(chip.program_counter(), 0x204);
}

#[test]
fn test_recursion_overflows_stack() {
    let mut chip = Chip8::new(&[0x22, 0x00], Profile::XoChip).unwrap();
    run(&mut chip, 16);
    assert_eq!(chip.stack_depth(), 16);

    let error = chip.cycle(0.0).unwrap_err();
    assert_eq!(error.kind, FaultKind::StackOverflow);
    assert_eq!(error.address, 0x200);
    assert_eq!(error.opcode, 0x2200);
    assert_eq!(chip.stack_depth(), 16);
    assert_eq!(chip.program_counter(), 0x200);
    assert_eq!(
        error.to_string(),
        "stack overflow, cannot call another subroutine at 0x0200 (opcode 0x2200)"
    );
}

#[test]
fn test_key_read_waits_for_release() {
    // V3 = key, then spin
    let mut chip = Chip8::new(&[0xF3, 0x0A, 0x12, 0x02], Profile::XoChip).unwrap();
    chip.set_input_pin(0x3, true);

    for _ in 0..10 {
        run(&mut chip, 1);
        assert_eq!(chip.program_counter(), 0x200);
    }

    chip.reset_input_pins();
    run(&mut chip, 1);
    assert_eq!(chip.program_counter(), 0x202);
    assert_eq!(chip.registers()[3], 0x3);
}

#[test]
fn test_exit_signal() {
    let mut chip = Chip8::new(&[0x60, 0x01, 0x00, 0xFD], Profile::XoChip).unwrap();
    run(&mut chip, 1);
    assert_eq!(chip.cycle(0.0), Ok(Signal::Exit));
    assert_eq!(chip.program_counter(), 0x202);
}

#[test]
fn test_stretched_memory_fits_program() {
    let program = [0x12, 0x00, 0xAB];
    let chip = Chip8::new(&program, Profile::XoChipStretched).unwrap();
    assert_eq!(chip.memory().len(), 0x203);
    assert_eq!(&chip.memory()[0x200..], &program);
}

#[test]
fn test_program_too_large() {
    let program = vec![0u8; 0xE01];
    match Chip8::new(&program, Profile::Schip) {
        Err(LoadProgramError::ProgramTooLarge { size, capacity }) => {
            assert_eq!(size, 0xE01);
            assert_eq!(capacity, 0xE00);
        }
        _ => panic!("expected ProgramTooLarge"),
    }
    assert!(Chip8::new(&program[..0xE00], Profile::Schip).is_ok());
    assert!(Chip8::new(&program, Profile::XoChip).is_ok());
}

#[test]
fn test_seeded_flags_reach_registers() {
    let mut chip = Chip8::new(&[0xF7, 0x85, 0x60, 0x2A, 0xF0, 0x75], Profile::XoChip).unwrap();
    chip.seed_flags(&[1, 2, 3, 4, 5, 6, 7, 8, 9]);
    run(&mut chip, 1);
    assert_eq!(&chip.registers()[..8], &[1, 2, 3, 4, 5, 6, 7, 8]);

    run(&mut chip, 2);
    assert_eq!(chip.flags(), Some(&[0x2A, 2, 3, 4, 5, 6, 7, 8]));
}

#[test]
fn test_hires_large_sprite() {
    // hires, I = big glyph "0", draw 16x16 at (0, 0)
    let mut chip = Chip8::new(&[0x00, 0xFF, 0xA0, 0xA0, 0xD0, 0x00], Profile::Schip).unwrap();
    run(&mut chip, 3);
    assert!(chip.is_hires());
    assert_eq!(chip.output_geometry(), (128, 64));
    let plane = chip.read_output_plane(0).unwrap();
    assert_eq!(plane.len(), 128 * 64);
    assert!(plane[0] != 0);
    assert!(chip.read_output_plane(1).is_none());
}

#[test]
fn test_timers_keep_running_during_frame() {
    let mut chip = Chip8::new(&[0x60, 0x3C, 0xF0, 0x15, 0x12, 0x04], Profile::XoChip).unwrap();
    run(&mut chip, 2);
    for _ in 0..30 {
        chip.cycle(1.0 / 60.0).unwrap();
    }
    let left = chip.timer(Timer::Delay);
    assert!(left == 30 || left == 29, "{}", left);
}

#[test]
fn test_load_program_file() {
    let path = std::env::temp_dir().join(format!("chippy-test-{}.ch8", std::process::id()));
    std::fs::write(&path, [0x12u8, 0x00]).unwrap();
    assert_eq!(load_program_file(&path).unwrap(), vec![0x12, 0x00]);
    std::fs::remove_file(&path).unwrap();

    match load_program_file(&path) {
        Err(LoadProgramError::CouldNotReadFile { path: reported, .. }) => {
            assert_eq!(reported, path.display().to_string());
        }
        _ => panic!("expected CouldNotReadFile"),
    }
}
