use criterion::{black_box, criterion_group, criterion_main, Criterion};

use coolbreeze_backend::config::JwtConfig;
use coolbreeze_backend::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};
use coolbreeze_backend::util::password::{PasswordUtils, PasswordUtilsImpl};

fn bench_jwt(c: &mut Criterion) {
    let jwt_utils = JwtTokenUtilsImpl::new(JwtConfig::default());
    let token = jwt_utils
        .generate_access_token("admin123", "admin@coolbreeze.example", "admin")
        .unwrap();

    c.bench_function("jwt_generate_access_token", |b| {
        b.iter(|| {
            jwt_utils
                .generate_access_token(
                    black_box("admin123"),
                    black_box("admin@coolbreeze.example"),
                    black_box("admin"),
                )
                .unwrap()
        })
    });

    c.bench_function("jwt_generate_token_pair", |b| {
        b.iter(|| {
            jwt_utils
                .generate_token_pair(
                    black_box("admin123"),
                    black_box("admin@coolbreeze.example"),
                    black_box("admin"),
                )
                .unwrap()
        })
    });

    c.bench_function("jwt_validate_access_token", |b| {
        b.iter(|| jwt_utils.validate_access_token(black_box(&token)).unwrap())
    });
}

fn bench_password(c: &mut Criterion) {
    let password = "TestPassword123!@#";
    let hash = PasswordUtilsImpl::hash_password(password).unwrap();

    // Argon2 runs tens of milliseconds per call; a small sample keeps the
    // suite under a minute.
    let mut group = c.benchmark_group("password");
    group.sample_size(10);
    group.bench_function("hash", |b| {
        b.iter(|| PasswordUtilsImpl::hash_password(black_box(password)).unwrap())
    });
    group.bench_function("verify", |b| {
        b.iter(|| PasswordUtilsImpl::verify_password(black_box(password), black_box(&hash)).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_jwt, bench_password);
criterion_main!(benches);
