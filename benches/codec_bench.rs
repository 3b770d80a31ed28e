use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use record_wire::model::{AttendanceType, ClassRoster, Student};
use record_wire::{Alignment, RecordCodec};

fn roster_with(students: usize) -> ClassRoster {
    let mut roster = ClassRoster::sample();
    roster.students = (0..students)
        .map(|i| {
            Student::new(18 + (i % 50) as i32, AttendanceType::Enrolled, format!("Student {i}"))
                .with_second_name("Surname")
                .with_score(i as f64)
        })
        .collect();
    roster
}

#[allow(clippy::unwrap_used)]
fn bench_roster_encode_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("roster_encode_decode");
    let codec = RecordCodec::default();

    for &students in &[0usize, 5, 100, 10_000] {
        let roster = roster_with(students);
        let size = codec.encoded_size(&roster);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_function(format!("encode_{students}_students"), |b| {
            b.iter_batched(
                || vec![0u8; size],
                |mut buf| {
                    codec.encode_into(&roster, &mut buf).unwrap();
                    buf
                },
                BatchSize::SmallInput,
            )
        });

        let bytes = codec.encode(&roster).unwrap();
        group.bench_function(format!("decode_{students}_students"), |b| {
            b.iter(|| {
                let decoded = codec.decode::<ClassRoster>(&bytes);
                assert!(decoded.is_ok());
            })
        });
    }
    group.finish();
}

fn bench_alignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_by_alignment");
    let roster = roster_with(1_000);

    for align in [1usize, 4, 8, 16] {
        let Some(alignment) = Alignment::new(align) else {
            continue;
        };
        let codec = RecordCodec::new(alignment);
        let bytes = codec.encode(&roster).unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(align), &bytes, |b, bytes| {
            b.iter(|| codec.decode::<ClassRoster>(bytes).is_ok())
        });
    }
    group.finish();
}

fn bench_reject(c: &mut Criterion) {
    let codec = RecordCodec::default();
    let mut bytes = codec.encode(&roster_with(1_000)).unwrap().to_vec();
    bytes.truncate(bytes.len() - 1);

    c.bench_function("reject_truncated_1000_students", |b| {
        b.iter(|| codec.decode::<ClassRoster>(&bytes).is_err())
    });
}

criterion_group!(benches, bench_roster_encode_decode, bench_alignment, bench_reject);
criterion_main!(benches);
