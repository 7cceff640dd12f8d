use criterion::{Criterion, black_box, criterion_group, criterion_main};

use compliancehub_auth::{ALL_PERMISSIONS, Role, allowed_permissions, has_permission};

fn bench_has_permission(c: &mut Criterion) {
    c.bench_function("has_permission/every_role_every_key", |b| {
        b.iter(|| {
            let mut granted = 0usize;
            for role in Role::ALL {
                for key in ALL_PERMISSIONS {
                    if has_permission(black_box(role), black_box(key)) {
                        granted += 1;
                    }
                }
            }
            granted
        })
    });

    c.bench_function("has_permission/unknown_key", |b| {
        b.iter(|| has_permission(black_box(Role::ReadOnly), black_box("nonexistent:key")))
    });
}

fn bench_allowed_permissions(c: &mut Criterion) {
    c.bench_function("allowed_permissions/accountant", |b| {
        b.iter(|| allowed_permissions(black_box(Role::Accountant)))
    });
}

criterion_group!(benches, bench_has_permission, bench_allowed_permissions);
criterion_main!(benches);
