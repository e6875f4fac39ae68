use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use stackfall::core::{
    Catalog, GameConfig, GameState, NullDisplay, SequenceRandomizer, UniformRandomizer,
};
use stackfall::types::{Coord, InputSnapshot, RotationDirection, TetrominoKind};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn core_hot_paths_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let catalog = Catalog::standard();
    let mut gs = GameState::new(&catalog, GameConfig::default(), UniformRandomizer::new(1)).unwrap();
    gs.start(&mut NullDisplay);

    let held = InputSnapshot {
        left: true,
        down: true,
        ..InputSnapshot::IDLE
    };
    let spin = InputSnapshot {
        rotate_left: true,
        rotate_right: true,
        ..InputSnapshot::IDLE
    };
    let drop = InputSnapshot {
        hard_drop: true,
        ..InputSnapshot::IDLE
    };

    // Warm-up, through one full game so every log callsite is registered.
    let _ = gs.tick(16, &spin, &mut NullDisplay);
    while !gs.game_over() {
        let _ = gs.tick(16, &drop, &mut NullDisplay);
    }
    gs.restart(&mut NullDisplay);

    // O pieces slid into five column pairs fill the bottom two rows.
    let mut clearing = GameState::new(
        &catalog,
        GameConfig::default(),
        SequenceRandomizer::repeat(TetrominoKind::O),
    )
    .unwrap();
    clearing.start(&mut NullDisplay);
    let fill_two_rows = |game: &mut GameState<'_, SequenceRandomizer>| -> u32 {
        for shift in [-4i32, -2, 0, 2, 4] {
            let step = if shift < 0 { Coord::LEFT } else { Coord::RIGHT };
            for _ in 0..shift.abs() {
                game.try_move(step);
            }
            game.hard_drop(&mut NullDisplay);
        }
        game.take_last_event().map_or(0, |e| e.lines_cleared)
    };
    assert_eq!(fill_two_rows(&mut clearing), 2);

    let mut lines_cleared = 0;
    let allocs = with_alloc_counting(|| {
        // Tick should be allocation-free.
        for _ in 0..200 {
            let _ = gs.tick(16, &InputSnapshot::IDLE, &mut NullDisplay);
            let _ = gs.tick(16, &held, &mut NullDisplay);
            let _ = gs.tick(16, &spin, &mut NullDisplay);
            if gs.game_over() {
                gs.restart(&mut NullDisplay);
            }
        }

        for _ in 0..50 {
            let _ = gs.try_rotate(RotationDirection::Clockwise);
            let _ = gs.try_rotate(RotationDirection::CounterClockwise);
        }

        // Pieces stacked at the spawn column never complete a row, so this
        // drives lock, spawn, game over and restart without row clears.
        for _ in 0..60 {
            let _ = gs.tick(16, &drop, &mut NullDisplay);
            if gs.game_over() {
                gs.restart(&mut NullDisplay);
            }
        }

        // Lock with a double line clear and row compaction.
        for _ in 0..10 {
            lines_cleared += fill_two_rows(&mut clearing);
        }
    });

    assert_eq!(lines_cleared, 20);
    assert!(allocs == 0);
}
