use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use roster::app::models::{Grade, Performance, StudentRecord};
use roster::app::services::filter_sort::{FilterSpec, SortKey, SortSpec, apply};

const GRADES: &[&str] = &["A+", "A", "A-", "B+", "B", "B-", "C", "D", "F", "N/A"];
const COURSES: &[&str] = &["Physics", "Mathematics", "Computer Science", "History", "Art"];
const NAMES: &[&str] = &["Zoë", "Émile", "ann", "Bob", "Chloé", "dave", "Ölaf", "Ines"];

fn gen_records(n: usize) -> Vec<StudentRecord> {
    (0..n)
        .map(|i| StudentRecord {
            id: i as u64 + 1,
            name: format!("{} {}", NAMES[i % NAMES.len()], i * 7919 % 10_007),
            email: format!("student{}@example.com", i),
            course: COURSES[i % COURSES.len()].to_string(),
            grade: Grade::new(GRADES[i * 31 % GRADES.len()]),
            enrollment_date: format!("20{:02}-{:02}-{:02}", 15 + i % 10, 1 + i % 12, 1 + i % 28),
            avatar: String::new(),
            performance: (i % 3 != 0).then(|| Performance {
                attendance: (i * 37 % 101) as u8,
                ..Performance::default()
            }),
            notes: None,
        })
        .collect()
}

fn bench_filter_sort(c: &mut Criterion) {
    let ns = [1_000usize, 10_000usize];
    let mut group = c.benchmark_group("filter_sort");

    for &n in &ns {
        let records = gen_records(n);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("sort_name", n), &records, |b, records| {
            let spec = FilterSpec::new().with_sort(SortSpec::asc(SortKey::Name));
            b.iter(|| criterion::black_box(apply(records, &spec)));
        });

        group.bench_with_input(BenchmarkId::new("sort_grade_desc", n), &records, |b, records| {
            let spec = FilterSpec::new().with_sort(SortSpec::desc(SortKey::Grade));
            b.iter(|| criterion::black_box(apply(records, &spec)));
        });

        group.bench_with_input(BenchmarkId::new("search_and_range", n), &records, |b, records| {
            let spec = FilterSpec::new()
                .with_search("e")
                .with_course("Physics")
                .with_performance_range(40, 90)
                .with_sort(SortSpec::asc(SortKey::EnrollmentDate));
            b.iter(|| criterion::black_box(apply(records, &spec)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_filter_sort);
criterion_main!(benches);
