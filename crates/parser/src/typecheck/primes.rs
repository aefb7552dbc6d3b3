//! Monotonic prime source backing type extension.
//!
//! Every extension multiplies the parent's base by a fresh prime, so the
//! generator must never hand out the same prime twice. The built-in types
//! claim the first primes (11 through 53) in registration order; user
//! extensions continue from 59.

pub struct PrimeGenerator {
    current: u64,
}

impl PrimeGenerator {
    /// The first prime handed out is 11; smaller primes are left free so
    /// bases stay clear of small accidental factors.
    pub fn new() -> Self {
        PrimeGenerator { current: 7 }
    }

    pub fn next_prime(&mut self) -> u128 {
        loop {
            self.current += 2;
            if is_prime(self.current) {
                return self.current as u128;
            }
        }
    }
}

impl Default for PrimeGenerator {
    fn default() -> Self {
        PrimeGenerator::new()
    }
}

fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut divisor = 3;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_primes_match_the_builtin_table() {
        let mut primes = PrimeGenerator::new();
        let reserved: Vec<u128> = (0..12).map(|_| primes.next_prime()).collect();
        assert_eq!(
            reserved,
            vec![11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53]
        );
        assert_eq!(primes.next_prime(), 59);
    }

    #[test]
    fn generated_primes_are_distinct() {
        let mut primes = PrimeGenerator::new();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            assert!(seen.insert(primes.next_prime()));
        }
    }
}
