use criterion::{Criterion, criterion_group, criterion_main};
use matchpairs_core::*;
use std::hint::black_box;

fn build_decks(c: &mut Criterion) {
    let factory = DeckFactory::default();
    let mut rng = SeededRandom::new(7);
    let mut ids = SequentialIds::default();

    c.bench_function("build 8-pair deck", |b| {
        b.iter(|| factory.build(black_box(8), &mut rng, &mut ids))
    });
}

fn play_round(c: &mut Criterion) {
    c.bench_function("perfect 8-pair round", |b| {
        b.iter(|| {
            let mut game =
                GameController::new(GameConfig::default(), MemoryStore::new(), 3).unwrap();
            game.start_round(0).unwrap();
            let mut now = 10_000;
            game.advance_to(now);
            let cards = game.round().deck().cards().to_vec();
            for (i, card) in cards.iter().enumerate() {
                if let Some(partner) = cards[i + 1..]
                    .iter()
                    .find(|other| other.symbol_id() == card.symbol_id())
                {
                    game.flip(card.id(), now);
                    game.flip(partner.id(), now);
                    now += 1_000;
                    game.advance_to(now);
                }
            }
            black_box(game.phase())
        })
    });
}

criterion_group!(benches, build_decks, play_round);
criterion_main!(benches);
