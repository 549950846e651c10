//! Integration test: Floor scaling and performance rating
//!
//! Floor scaling is shared by monster stats, gold, experience and drop
//! rates, so these tests check the curve once through the public API and
//! then through the systems that depend on it. Rating tests score sessions
//! produced by real battles.

use battle_engine::combat::{Action, BattleStats, BattleType, Combatant, Side, SideStats};
use battle_engine::core::constants::MAX_EFFECTIVE_FLOOR;
use battle_engine::core::scaling::{effective_floor, scale_by_floor};
use battle_engine::rating::{rate_battle, Grade, MAX_RATING_POINTS};
use battle_engine::rewards::experience_for;
use battle_engine::BattleEngine;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// =========================================================================
// Floor scaling
// =========================================================================

#[test]
fn test_scaling_monotonic_and_capped() {
    let mut previous = scale_by_floor(100.0, 0, 0.1);
    for floor in 1..=1_000 {
        let value = scale_by_floor(100.0, floor, 0.1);
        assert!(
            value >= previous,
            "Floor {floor} decreased: {value} < {previous}"
        );
        previous = value;
    }
    assert_eq!(
        scale_by_floor(100.0, MAX_EFFECTIVE_FLOOR, 0.1),
        scale_by_floor(100.0, u32::MAX, 0.1)
    );
    assert_eq!(effective_floor(10_000), MAX_EFFECTIVE_FLOOR);
}

#[test]
fn test_scaling_never_negative() {
    for base in [-50.0, 0.0, f64::NAN] {
        for rate in [-1.0, 0.0, 0.5] {
            let value = scale_by_floor(base, 250, rate);
            assert!(value >= 0.0, "base {base} rate {rate} gave {value}");
        }
    }
}

#[test]
fn test_spawned_monsters_grow_with_floor() {
    let engine = BattleEngine::default();
    let shallow = engine.spawn_monster("cave_troll", 1).unwrap();
    let deep = engine.spawn_monster("cave_troll", 300).unwrap();
    let capped = engine.spawn_monster("cave_troll", 5_000).unwrap();
    assert!(deep.max_health > shallow.max_health);
    assert!(deep.armor >= shallow.armor);
    assert!(deep.power > shallow.power);
    let at_cap = engine.spawn_monster("cave_troll", MAX_EFFECTIVE_FLOOR);
    assert_eq!(at_cap.unwrap(), capped);
}

#[test]
fn test_experience_follows_floor_curve() {
    let rating = battle_engine::rating::PerformanceRating::with_grade(Grade::C);
    let mut previous = 0;
    for floor in [0, 1, 5, 25, 100, 500] {
        let xp = experience_for(floor, BattleType::FloorBoss, &rating);
        assert!(xp >= previous);
        previous = xp;
    }
}

// =========================================================================
// Rating
// =========================================================================

#[test]
fn test_rating_points_bounded() {
    let hero = Combatant::new("hero", "Hero", 100, 0);
    let extreme = BattleStats {
        turns: 1,
        player: SideStats {
            damage_dealt: u64::MAX,
            damage_received: 1,
            critical_hits: u32::MAX,
            ..SideStats::default()
        },
        opponent: SideStats::default(),
    };
    let rating = rate_battle(&extreme, Side::Player, &hero);
    assert!(rating.points <= MAX_RATING_POINTS);
    assert!(rating.percent <= 100.0);
}

#[test]
fn test_rating_label_format() {
    let hero = Combatant::new("hero", "Hero", 100, 0);
    let rating = rate_battle(&BattleStats::default(), Side::Player, &hero);
    // 25 for zero turns plus 15 for full health
    assert_eq!(rating.points, 40);
    assert_eq!(rating.to_string(), "POOR (D)");
}

#[test]
fn test_quick_dominant_win_outrates_slow_scrappy_win() {
    let engine = BattleEngine::default();

    let fight = |hero: Combatant, action: Action, seed: u64| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let slime = engine.spawn_monster("slime", 1).unwrap();
        let mut session = engine.start_battle(hero, slime, 1, BattleType::Explore);
        while !session.is_over() {
            let opponent_action = engine.choose_opponent_action(&session.opponent, &mut rng);
            let (next, _) = engine
                .resolve_turn(session, &action, &opponent_action, &mut rng)
                .unwrap();
            session = next;
        }
        engine.rate_battle(&session, Side::Player)
    };

    let strong = Combatant::new("strong", "Strong", 200, 0).with_weapons(&["worldsplitter"]);
    let weak = Combatant::new("weak", "Weak", 60, 0);

    let fast = fight(strong, Action::weapon("worldsplitter"), 3);
    let slow = fight(weak, Action::basic_attack(), 3);
    assert!(
        fast.points > slow.points,
        "fast {} should beat slow {}",
        fast,
        slow
    );
    assert!(fast.grade > slow.grade);
}

#[test]
fn test_rating_the_opponent_side_reads_opponent_stats() {
    let engine = BattleEngine::default();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut session = engine.start_battle(
        Combatant::new("a", "A", 500, 0).with_weapons(&["rusty_sword"]),
        Combatant::new("b", "B", 500, 0)
            .with_weapons(&["rusty_sword"])
            .with_abilities(&["dodge"]),
        1,
        BattleType::Pvp,
    );
    let player_action = Action::weapon("rusty_sword");
    for opponent_action in [
        Action::ability("dodge"),
        Action::ability("dodge"),
        Action::weapon("rusty_sword"),
    ] {
        let (next, _) = engine
            .resolve_turn(session, &player_action, &opponent_action, &mut rng)
            .unwrap();
        session = next;
    }

    let opponent = engine.rate_battle(&session, Side::Opponent);
    let player = engine.rate_battle(&session, Side::Player);
    assert_eq!(opponent.breakdown.abilities, 5);
    assert_eq!(player.breakdown.abilities, 0);
    assert_eq!(
        opponent,
        rate_battle(&session.stats, Side::Opponent, &session.opponent)
    );
}
