#![allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]

use std::sync::Arc;

use pretty_assertions::assert_eq;
use spell_compile::{compile, CompiledSpell, CompilerConfig};
use spell_ir::{param, Coord, EntityRef, Piece, PieceKind, Side, SpellGrid, Vector3};

use super::*;
use crate::context::SpellContext;
use crate::errors::RuntimeErrorKind;
use crate::feedback::buffer_feedback;
use crate::sandbox::{SandboxWorld, WorldEvent};
use crate::world::{ItemHandle, ToolCapabilities};

const CASTER: EntityRef = EntityRef(1);
const VICTIM: EntityRef = EntityRef(2);

type Cells = Vec<(usize, usize, Piece)>;

fn at(x: usize, y: usize) -> Coord {
    Coord::new(x, y).unwrap()
}

fn piece(kind: PieceKind, params: &[(&str, Side)]) -> Piece {
    params.iter().fold(Piece::new(kind), |p, (name, side)| {
        p.with_param(name, *side).unwrap()
    })
}

fn spell(cells: Cells) -> Arc<CompiledSpell> {
    let grid = cells
        .into_iter()
        .fold(SpellGrid::new(), |g, (x, y, p)| g.with(at(x, y), p));
    Arc::new(compile(&Arc::new(grid), &CompilerConfig::default()).unwrap())
}

fn world() -> SandboxWorld {
    SandboxWorld::new()
        .with_entity(CASTER, Vector3::ZERO)
        .with_entity(VICTIM, Vector3::new(5.0, 0.0, 0.0))
}

fn context(spell: Arc<CompiledSpell>) -> SpellContext {
    SpellContext::new(CASTER, CASTER, Some(spell), 0)
}

/// Execute once, returning the status and captured feedback.
fn cast(world: &mut SandboxWorld, ctx: &SpellContext) -> (CastStatus, String) {
    let feedback = buffer_feedback();
    let mut interpreter = InterpreterBuilder::new(world)
        .feedback(Arc::clone(&feedback))
        .build();
    let status = interpreter.safe_execute(ctx);
    (status, feedback.get_output())
}

fn ignite(target: Side, time: Side) -> Piece {
    piece(
        PieceKind::Ignite,
        &[(param::TARGET, target), (param::TIME, time)],
    )
}

/// `target` (0,0) -> ignite (1,0) <- number (1,1)
fn ignite_cells(target: PieceKind, time: f64) -> Cells {
    vec![
        (0, 0, Piece::new(target)),
        (1, 0, ignite(Side::Left, Side::Bottom)),
        (1, 1, Piece::number(time)),
    ]
}

/// vector_construct (1,0) <- number (1,1); vector -> `trick` (2,0) <- number (2,1)
fn positional_cells(trick: PieceKind, x: f64) -> Cells {
    let mut cells = vec![
        (
            1,
            0,
            piece(PieceKind::VectorConstruct, &[(param::X, Side::Bottom)]),
        ),
        (1, 1, Piece::number(x)),
    ];
    let trick_piece = if trick == PieceKind::Explode {
        piece(
            trick,
            &[(param::POSITION, Side::Left), (param::POWER, Side::Bottom)],
        )
    } else {
        piece(trick, &[(param::POSITION, Side::Left)])
    };
    cells.push((2, 0, trick_piece));
    cells.push((2, 1, Piece::number(2.0)));
    cells
}

#[test]
fn ignite_applies_its_effect() {
    let mut world = world();
    let ctx = context(spell(ignite_cells(PieceKind::Caster, 3.0)));
    let (status, feedback) = cast(&mut world, &ctx);
    assert_eq!(status, CastStatus::Stopped);
    assert_eq!(feedback, "");
    assert_eq!(
        world.events(),
        &[WorldEvent::Ignited {
            entity: CASTER,
            ticks: 3
        }]
    );
}

#[test]
fn shared_piece_is_evaluated_once() {
    // attacked (0,0) -> position (1,0), read by two explosions
    let cells = vec![
        (0, 0, Piece::new(PieceKind::AttackedEntity)),
        (
            1,
            0,
            piece(PieceKind::EntityPosition, &[(param::TARGET, Side::Left)]),
        ),
        (
            2,
            0,
            piece(
                PieceKind::Explode,
                &[(param::POSITION, Side::Left), (param::POWER, Side::Bottom)],
            ),
        ),
        (2, 1, Piece::number(1.0)),
        (
            1,
            1,
            piece(
                PieceKind::Explode,
                &[(param::POSITION, Side::Top), (param::POWER, Side::Left)],
            ),
        ),
        (0, 1, Piece::number(2.0)),
    ];
    let mut world = world();
    let ctx = context(spell(cells)).with_attacked_entity(Some(VICTIM));
    let (status, _) = cast(&mut world, &ctx);

    assert_eq!(status, CastStatus::Stopped);
    assert_eq!(world.position_queries(VICTIM), 1);
    let victim_pos = Vector3::new(5.0, 0.0, 0.0);
    assert_eq!(
        world.events(),
        &[
            WorldEvent::Exploded {
                position: victim_pos,
                power: 1.0
            },
            WorldEvent::Exploded {
                position: victim_pos,
                power: 2.0
            },
        ]
    );
}

#[test]
fn unsuppressed_null_target_is_reported() {
    let mut world = world();
    let ctx = context(spell(ignite_cells(PieceKind::AttackedEntity, 1.0)));
    let (status, feedback) = cast(&mut world, &ctx);

    let CastStatus::Faulted(err) = status else {
        panic!("expected a fault");
    };
    assert_eq!(err.kind, RuntimeErrorKind::NullTarget);
    assert_eq!(err.at, Some(at(1, 0)));
    assert_eq!(feedback, "entity#1: error[E1001]: null target at (1, 0)\n");
    assert!(world.events().is_empty());
}

#[test]
fn suppressed_null_target_ends_silently() {
    let mut cells = ignite_cells(PieceKind::AttackedEntity, 1.0);
    cells.push((8, 8, Piece::new(PieceKind::ErrorSuppressor)));
    let mut world = world();
    let ctx = context(spell(cells));
    let (status, feedback) = cast(&mut world, &ctx);

    assert_eq!(status, CastStatus::Stopped);
    assert_eq!(feedback, "");
    assert!(ctx.is_stopped());
}

#[test]
fn a_fault_ends_the_cast_for_good() {
    let mut world = world();
    let ctx = context(spell(ignite_cells(PieceKind::AttackedEntity, 1.0)));
    cast(&mut world, &ctx);
    let (status, feedback) = cast(&mut world, &ctx);
    assert_eq!(status, CastStatus::Stopped);
    assert_eq!(feedback, "");
}

#[test]
fn delay_holds_back_later_actions() {
    let cells = vec![
        (0, 0, Piece::number(2.0)),
        (1, 0, piece(PieceKind::Delay, &[(param::TIME, Side::Left)])),
        (0, 1, Piece::new(PieceKind::Caster)),
        (1, 1, ignite(Side::Left, Side::Bottom)),
        (1, 2, Piece::number(1.0)),
    ];
    let mut world = world();
    let ctx = context(spell(cells));

    assert_eq!(cast(&mut world, &ctx).0, CastStatus::Delayed { ticks: 2 });
    // executing again without ticking runs nothing
    assert_eq!(cast(&mut world, &ctx).0, CastStatus::Delayed { ticks: 2 });
    assert!(world.events().is_empty());

    assert!(!ctx.tick());
    assert_eq!(cast(&mut world, &ctx).0, CastStatus::Delayed { ticks: 1 });
    assert!(world.events().is_empty());

    assert!(ctx.tick());
    assert_eq!(cast(&mut world, &ctx).0, CastStatus::Stopped);
    assert_eq!(world.events().len(), 1);
}

#[test]
fn repeat_runs_its_body_count_times() {
    let mut cells = ignite_cells(PieceKind::Caster, 1.0);
    cells.push((
        2,
        0,
        piece(
            PieceKind::Repeat,
            &[(param::COUNT, Side::Bottom), (param::BODY, Side::Left)],
        ),
    ));
    cells.push((2, 1, Piece::number(3.0)));
    let mut world = world();
    cast(&mut world, &context(spell(cells)));
    assert_eq!(world.events().len(), 3);
}

#[test]
fn branch_follows_the_loop_index() {
    let mut cells = ignite_cells(PieceKind::Caster, 1.0);
    cells.push((
        2,
        0,
        piece(
            PieceKind::Branch,
            &[(param::CONDITION, Side::Bottom), (param::THEN, Side::Left)],
        ),
    ));
    cells.push((2, 1, Piece::new(PieceKind::LoopIndex)));
    let mut world = world();
    let first = context(spell(cells));

    // loop index 0: condition false, no otherwise branch
    assert_eq!(cast(&mut world, &first).0, CastStatus::Stopped);
    assert!(world.events().is_empty());

    let second = first.next_loop();
    assert_eq!(cast(&mut world, &second).0, CastStatus::Stopped);
    assert_eq!(world.events().len(), 1);
}

#[test]
fn die_stops_on_zero() {
    let die_first = |condition: f64| {
        let mut cells = vec![
            (0, 0, Piece::number(condition)),
            (1, 0, piece(PieceKind::Die, &[(param::CONDITION, Side::Left)])),
        ];
        cells.push((0, 1, Piece::new(PieceKind::Caster)));
        cells.push((1, 1, ignite(Side::Left, Side::Bottom)));
        cells.push((1, 2, Piece::number(1.0)));
        cells
    };

    let mut world = world();
    cast(&mut world, &context(spell(die_first(0.0))));
    assert!(world.events().is_empty());

    cast(&mut world, &context(spell(die_first(1.0))));
    assert_eq!(world.events().len(), 1);
}

#[test]
fn explosions_outside_the_radius_fail() {
    let mut world = world();
    let compiled = spell(positional_cells(PieceKind::Explode, 40.0));
    let (status, _) = cast(&mut world, &context(compiled));
    let CastStatus::Faulted(err) = status else {
        panic!("expected a fault");
    };
    assert_eq!(err.kind, RuntimeErrorKind::OutsideRadius);
    assert_eq!(err.at, Some(at(2, 0)));

    let mut world = self::world();
    let compiled = spell(positional_cells(PieceKind::Explode, 32.0));
    let (status, _) = cast(&mut world, &context(compiled));
    assert_eq!(status, CastStatus::Stopped);
}

#[test]
fn motion_needs_a_direction() {
    let cells = vec![
        (0, 0, Piece::new(PieceKind::Caster)),
        (
            1,
            0,
            piece(
                PieceKind::AddMotion,
                &[(param::TARGET, Side::Left), (param::DIRECTION, Side::Bottom)],
            ),
        ),
        (1, 1, Piece::new(PieceKind::VectorConstruct)),
    ];
    let mut world = world();
    let (status, _) = cast(&mut world, &context(spell(cells)));
    assert!(matches!(
        status,
        CastStatus::Faulted(ref err) if err.kind == RuntimeErrorKind::NullVector
    ));
}

#[test]
fn immune_targets_are_rejected() {
    let mut world = SandboxWorld::new()
        .with_entity(CASTER, Vector3::ZERO)
        .with_immune_entity(VICTIM, Vector3::new(1.0, 0.0, 0.0));
    let ctx = context(spell(ignite_cells(PieceKind::AttackedEntity, 1.0)))
        .with_attacked_entity(Some(VICTIM));
    let (status, _) = cast(&mut world, &ctx);
    assert!(matches!(
        status,
        CastStatus::Faulted(ref err) if err.kind == RuntimeErrorKind::ImmuneTarget
    ));
}

#[test]
fn breaking_needs_the_right_tool() {
    let block = Vector3::new(3.0, 0.0, 0.0);
    let base = || {
        world()
            .with_equipment(CASTER, ItemHandle(9), 0)
            .with_block(block, ToolCapabilities::PICKAXE)
    };

    let mut weak = base().with_tool(ItemHandle(9), ToolCapabilities::AXE);
    let compiled = spell(positional_cells(PieceKind::BreakBlock, 3.0));
    let (status, _) = cast(&mut weak, &context(compiled));
    assert!(matches!(
        status,
        CastStatus::Faulted(ref err) if err.kind == (RuntimeErrorKind::MissingCapability {
            required: ToolCapabilities::PICKAXE
        })
    ));

    let mut strong = base().with_tool(ItemHandle(9), ToolCapabilities::PICKAXE);
    let compiled = spell(positional_cells(PieceKind::BreakBlock, 3.0));
    cast(&mut strong, &context(compiled));
    assert_eq!(
        strong.events(),
        &[WorldEvent::BlockBroken {
            position: block,
            tool: ItemHandle(9)
        }]
    );
}

#[test]
fn placing_uses_the_resolved_target_slot() {
    let mut world = world().with_equipment(CASTER, ItemHandle(9), 8);
    let compiled = spell(positional_cells(PieceKind::PlaceBlock, 1.0));
    cast(&mut world, &context(compiled));
    assert_eq!(
        world.events(),
        &[WorldEvent::BlockPlaced {
            position: Vector3::new(1.0, 0.0, 0.0),
            slot: 0
        }]
    );
}

#[test]
fn placing_without_equipment_fails() {
    let mut world = world();
    let compiled = spell(positional_cells(PieceKind::PlaceBlock, 1.0));
    let (status, feedback) = cast(&mut world, &context(compiled));
    assert!(matches!(
        status,
        CastStatus::Faulted(ref err) if err.kind == RuntimeErrorKind::NoEquipment
    ));
    assert!(feedback.contains("error[E1003]"));
}

#[test]
fn debug_writes_to_feedback() {
    let cells = vec![
        (0, 0, Piece::number(3.0)),
        (1, 0, piece(PieceKind::Debug, &[(param::TARGET, Side::Left)])),
        (
            2,
            0,
            piece(
                PieceKind::Debug,
                &[(param::TARGET, Side::Bottom), (param::NUMBER, Side::Right)],
            ),
        ),
        (2, 1, Piece::new(PieceKind::Caster)),
        (3, 0, Piece::number(7.0)),
    ];
    let mut world = world();
    let (status, feedback) = cast(&mut world, &context(spell(cells)));
    assert_eq!(status, CastStatus::Stopped);
    assert_eq!(feedback, "entity#1: 3\nentity#1: 7: entity#1\n");
}

#[test]
fn attacker_selector_targets_whoever_struck_the_caster() {
    let compiled = spell(ignite_cells(PieceKind::Attacker, 2.0));
    let ctx = SpellContext::builder(CASTER)
        .spell(Arc::clone(&compiled))
        .attacked_by(VICTIM, 4.5)
        .build();
    let mut world = world();
    assert_eq!(cast(&mut world, &ctx).0, CastStatus::Stopped);
    assert_eq!(
        world.events(),
        &[WorldEvent::Ignited {
            entity: VICTIM,
            ticks: 2
        }]
    );

    let (status, _) = cast(&mut world, &context(compiled));
    let CastStatus::Faulted(err) = status else {
        panic!("expected a fault");
    };
    assert_eq!(err.kind, RuntimeErrorKind::NullTarget);
}

#[test]
fn damage_taken_defaults_to_zero() {
    let cells = vec![
        (0, 0, Piece::new(PieceKind::DamageTaken)),
        (1, 0, piece(PieceKind::Debug, &[(param::TARGET, Side::Left)])),
    ];
    let compiled = spell(cells);
    let hit = SpellContext::builder(CASTER)
        .spell(Arc::clone(&compiled))
        .attacked_by(VICTIM, 4.5)
        .build();
    let mut world = world();
    assert_eq!(cast(&mut world, &hit).1, "entity#1: 4.5\n");
    assert_eq!(cast(&mut world, &context(compiled)).1, "entity#1: 0\n");
}

#[test]
fn context_without_spell_does_nothing() {
    let mut world = world();
    let ctx = SpellContext::new(CASTER, CASTER, None, 0);
    assert_eq!(cast(&mut world, &ctx).0, CastStatus::Stopped);
}

#[test]
fn derived_context_continues_the_same_cast() {
    let mut cells = ignite_cells(PieceKind::AttackedEntity, 1.0);
    cells.push((0, 4, Piece::new(PieceKind::Caster)));
    cells.push((1, 4, ignite(Side::Left, Side::Bottom)));
    cells.push((1, 5, Piece::number(2.0)));
    let spell = spell(cells);

    let base = context(spell);
    let derived = base.derive().with_attacked_entity(Some(VICTIM));
    let mut world = world();
    assert_eq!(cast(&mut world, &derived).0, CastStatus::Stopped);
    assert_eq!(world.events().len(), 2);
    // the stack was shared, so the base has nothing left to run
    assert!(base.is_stopped());
}
