use moderator::models::death::DeathCause;
use moderator::models::night::Action;
use moderator::models::player::{LoverLink, VoteBan};
use moderator::models::victory::VictoryKind;
use moderator::utils::test_setup::{game_with_roles, id};
use moderator::{Game, GameError, GamePhase, Resume, Role};

fn pass_night(game: &mut Game) {
    while game.current_step().is_some() {
        game.resolve_step(Action::Pass).unwrap();
    }
}

fn to_day_vote(game: &mut Game) {
    game.begin_first_night().unwrap();
    pass_night(game);
    game.resolve_morning().unwrap();
    assert_eq!(game.phase, GamePhase::DayVote);
}

#[test]
fn hunter_fires_after_being_voted_out() {
    let mut game = game_with_roles(&[
        Role::Hunter,
        Role::SimpleWerewolf,
        Role::SimpleWerewolf,
        Role::SimpleVillager,
        Role::SimpleVillager,
        Role::SimpleVillager,
    ]);
    to_day_vote(&mut game);

    game.vote_out(&id(1)).unwrap();
    assert_eq!(
        game.phase,
        GamePhase::ReflexShot {
            shooter: id(1),
            resume: Resume::NextNight
        }
    );
    assert_eq!(game.turn, 1);

    let report = game.reflex_shot(Some(&id(2))).unwrap();
    assert_eq!(report.dead, vec![id(2)]);
    assert_eq!(game.phase, GamePhase::Night);
    assert_eq!(game.turn, 2);

    let causes: Vec<_> = game
        .log
        .entries()
        .iter()
        .filter(|e| !e.dead.is_empty())
        .map(|e| e.cause)
        .collect();
    assert_eq!(causes, vec![Some(DeathCause::VillageVote), Some(DeathCause::ReflexShot)]);
}

#[test]
fn hunter_killed_at_night_shoots_before_the_vote() {
    let mut game = game_with_roles(&[
        Role::Hunter,
        Role::SimpleWerewolf,
        Role::SimpleVillager,
        Role::SimpleVillager,
        Role::SimpleVillager,
    ]);
    game.begin_first_night().unwrap();
    game.resolve_step(Action::Targets(vec![id(1)])).unwrap();
    game.resolve_morning().unwrap();
    assert!(matches!(
        game.phase,
        GamePhase::ReflexShot {
            resume: Resume::DayVote,
            ..
        }
    ));

    assert_eq!(game.reflex_shot(Some(&id(1))), Err(GameError::DeadTarget(id(1))));
    game.reflex_shot(None).unwrap();
    assert_eq!(game.phase, GamePhase::DayVote);
}

#[test]
fn tie_break_always_reaches_the_ban_phase() {
    let mut game = game_with_roles(&[
        Role::Scapegoat,
        Role::Hunter,
        Role::SimpleWerewolf,
        Role::SimpleVillager,
        Role::SimpleVillager,
        Role::SimpleVillager,
        Role::SimpleVillager,
    ]);
    game.players[0].lover = Some(LoverLink { group: 1 });
    game.players[1].lover = Some(LoverLink { group: 1 });
    to_day_vote(&mut game);

    let report = game.tie_break().unwrap();
    assert_eq!(report.dead, vec![id(1), id(2)]);
    assert_eq!(
        game.phase,
        GamePhase::ReflexShot {
            shooter: id(2),
            resume: Resume::ScapegoatBan
        }
    );

    game.reflex_shot(None).unwrap();
    assert_eq!(game.phase, GamePhase::ScapegoatBan);

    game.confirm_scapegoat_bans(&[id(4), id(5)]).unwrap();
    assert_eq!(game.phase, GamePhase::Night);
    assert_eq!(game.player(&id(4)).unwrap().vote_ban, Some(VoteBan::ForDay(2)));
    assert!(!game.player(&id(4)).unwrap().can_vote(2));
    assert!(game.player(&id(6)).unwrap().can_vote(2));
}

#[test]
fn tie_break_without_scapegoat_is_rejected() {
    let mut game = game_with_roles(&[Role::SimpleWerewolf, Role::SimpleVillager, Role::SimpleVillager, Role::SimpleVillager]);
    to_day_vote(&mut game);
    assert_eq!(game.tie_break(), Err(GameError::NoLivingHolder(Role::Scapegoat)));
    assert_eq!(game.phase, GamePhase::DayVote);
}

#[test]
fn voting_out_the_elder_strips_village_powers() {
    let mut game = game_with_roles(&[
        Role::Elder,
        Role::Seer,
        Role::Witch,
        Role::SimpleWerewolf,
        Role::SimpleVillager,
        Role::SimpleVillager,
    ]);
    to_day_vote(&mut game);
    let report = game.vote_out(&id(1)).unwrap();
    assert!(report.curse_triggered);

    assert!(game.player(&id(2)).unwrap().power_lost);
    assert!(game.player(&id(3)).unwrap().power_lost);
    assert_eq!(game.night_plan().len(), 1);
    assert!(game.night_plan()[0].is_pack());
}

#[test]
fn idiot_survives_and_loses_the_vote() {
    let mut game = game_with_roles(&[
        Role::Idiot,
        Role::SimpleWerewolf,
        Role::SimpleVillager,
        Role::SimpleVillager,
    ]);
    to_day_vote(&mut game);
    let report = game.vote_out(&id(1)).unwrap();
    assert_eq!(report.spared, vec![id(1)]);
    assert!(report.dead.is_empty());
    assert!(!game.player(&id(1)).unwrap().can_vote(2));
    assert_eq!(game.phase, GamePhase::Night);
}

#[test]
fn victory_is_suggested_then_confirmed_once() {
    let mut game = game_with_roles(&[Role::SimpleWerewolf, Role::SimpleVillager, Role::SimpleVillager]);
    to_day_vote(&mut game);
    game.vote_out(&id(1)).unwrap();

    let suggested = game.suggested.clone().unwrap();
    assert_eq!(suggested.kind, VictoryKind::Village);
    assert!(game.winner.is_none());

    game.dismiss_suggestion();
    assert!(game.suggested.is_none());
    assert_eq!(game.evaluate_victory().cloned(), Some(suggested.clone()));

    let log_len = game.log.len();
    assert_eq!(game.confirm_victory().cloned(), Some(suggested.clone()));
    assert_eq!(game.confirm_victory().cloned(), Some(suggested));
    assert_eq!(game.log.len(), log_len + 1);
    assert_eq!(game.phase, GamePhase::Victory);
}

#[test]
fn operations_check_the_phase() {
    let mut game = game_with_roles(&[Role::SimpleWerewolf, Role::SimpleVillager, Role::SimpleVillager]);
    assert!(matches!(
        game.resolve_step(Action::Pass),
        Err(GameError::WrongPhase { .. })
    ));
    assert!(matches!(game.vote_out(&id(2)), Err(GameError::WrongPhase { .. })));
    assert!(matches!(game.reflex_shot(None), Err(GameError::WrongPhase { .. })));
}

#[test]
fn angel_win_survives_the_lovers_reflex_shot() {
    let mut game = game_with_roles(&[
        Role::Angel,
        Role::Hunter,
        Role::SimpleWerewolf,
        Role::SimpleVillager,
        Role::SimpleVillager,
        Role::SimpleVillager,
        Role::SimpleVillager,
    ]);
    game.players[0].lover = Some(LoverLink { group: 1 });
    game.players[1].lover = Some(LoverLink { group: 1 });
    to_day_vote(&mut game);

    game.vote_out(&id(1)).unwrap();
    assert_eq!(game.suggested.as_ref().unwrap().kind, VictoryKind::Solo);
    assert!(matches!(game.phase, GamePhase::ReflexShot { .. }));

    let report = game.reflex_shot(Some(&id(5))).unwrap();
    assert_eq!(report.dead, vec![id(5)]);
    let suggested = game.suggested.clone().unwrap();
    assert_eq!(suggested.kind, VictoryKind::Solo);
    assert_eq!(suggested.survivors, vec![id(1)]);

    assert_eq!(game.confirm_victory().map(|r| r.kind), Some(VictoryKind::Solo));
    assert_eq!(game.phase, GamePhase::Victory);
}
