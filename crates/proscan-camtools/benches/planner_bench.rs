use criterion::{black_box, criterion_group, criterion_main, Criterion};
use proscan_camtools::{MotionProgramEmitter, ProgramOptions, ValidatedParameters, ZonePlanner};
use proscan_core::ScanParameters;

fn fine_scan() -> ValidatedParameters {
    ValidatedParameters::new(ScanParameters {
        scan_length: 1000.0,
        start_zone_length: 50.0,
        start_zone_step: 0.1,
        main_zone_step: 0.25,
        end_zone_length: 50.0,
        end_zone_step: 0.1,
        ..ScanParameters::default()
    })
    .expect("benchmark parameters are valid")
}

fn bench_planner(c: &mut Criterion) {
    let params = fine_scan();
    c.bench_function("plan_steps", |b| {
        b.iter(|| ZonePlanner::new(black_box(params)).steps())
    });
}

fn bench_emitter(c: &mut Criterion) {
    let params = fine_scan();
    let emitter = MotionProgramEmitter::new(ProgramOptions::default());
    c.bench_function("emit_program", |b| {
        b.iter(|| emitter.emit(black_box(&params)).to_text())
    });
}

criterion_group!(benches, bench_planner, bench_emitter);
criterion_main!(benches);
