//! Ed25519 curve membership test for derived addresses.
//!
//! A derived address must not be a valid compressed Edwards-Y point,
//! otherwise some private key could in principle sign for it. The check
//! mirrors point decompression: with `y` taken from the low 255 bits,
//! the point exists iff `(y^2 - 1) * (d*y^2 + 1)` is a square mod p.
//!
//! Field elements are four little-endian `u64` limbs, always kept
//! fully reduced below `p = 2^255 - 19`.

type Fe = [u64; 4];

const P: Fe = [
    0xffff_ffff_ffff_ffed,
    0xffff_ffff_ffff_ffff,
    0xffff_ffff_ffff_ffff,
    0x7fff_ffff_ffff_ffff,
];

/// (p - 1) / 2, the Euler criterion exponent.
const HALF_P_MINUS_ONE: Fe = [
    0xffff_ffff_ffff_fff6,
    0xffff_ffff_ffff_ffff,
    0xffff_ffff_ffff_ffff,
    0x3fff_ffff_ffff_ffff,
];

/// Edwards curve constant d = -121665/121666.
const D: Fe = [
    0x75eb_4dca_1359_78a3,
    0x0070_0a4d_4141_d8ab,
    0x8cc7_4079_7779_e898,
    0x5203_6cee_2b6f_fe73,
];

const ZERO: Fe = [0, 0, 0, 0];
const ONE: Fe = [1, 0, 0, 0];

/// Returns true if `bytes` decodes as a point on the ed25519 curve.
pub fn is_on_curve(bytes: &[u8; 32]) -> bool {
    let y = from_bytes(bytes);
    let y2 = mul(&y, &y);
    let u = sub(&y2, &ONE);
    let v = add(&mul(&D, &y2), &ONE);
    is_square(&mul(&u, &v))
}

fn from_bytes(bytes: &[u8; 32]) -> Fe {
    let mut limbs = ZERO;
    for (i, limb) in limbs.iter_mut().enumerate() {
        let mut chunk = [0u8; 8];
        chunk.copy_from_slice(&bytes[i * 8..i * 8 + 8]);
        *limb = u64::from_le_bytes(chunk);
    }
    // sign bit of x
    limbs[3] &= 0x7fff_ffff_ffff_ffff;
    reduce(limbs)
}

fn geq(a: &Fe, b: &Fe) -> bool {
    for i in (0..4).rev() {
        if a[i] != b[i] {
            return a[i] > b[i];
        }
    }
    true
}

fn add_raw(a: &Fe, b: &Fe) -> (Fe, bool) {
    let mut out = ZERO;
    let mut carry = false;
    for i in 0..4 {
        let (s1, c1) = a[i].overflowing_add(b[i]);
        let (s2, c2) = s1.overflowing_add(carry as u64);
        out[i] = s2;
        carry = c1 || c2;
    }
    (out, carry)
}

fn sub_raw(a: &Fe, b: &Fe) -> (Fe, bool) {
    let mut out = ZERO;
    let mut borrow = false;
    for i in 0..4 {
        let (d1, b1) = a[i].overflowing_sub(b[i]);
        let (d2, b2) = d1.overflowing_sub(borrow as u64);
        out[i] = d2;
        borrow = b1 || b2;
    }
    (out, borrow)
}

fn reduce(mut a: Fe) -> Fe {
    while geq(&a, &P) {
        a = sub_raw(&a, &P).0;
    }
    a
}

fn add(a: &Fe, b: &Fe) -> Fe {
    // both inputs < p < 2^255, so the sum cannot carry out of 256 bits
    reduce(add_raw(a, b).0)
}

fn sub(a: &Fe, b: &Fe) -> Fe {
    let (diff, borrow) = sub_raw(a, b);
    if borrow {
        add_raw(&diff, &P).0
    } else {
        diff
    }
}

fn mul(a: &Fe, b: &Fe) -> Fe {
    let mut wide = [0u64; 8];
    for i in 0..4 {
        let mut carry: u128 = 0;
        for j in 0..4 {
            let cur = wide[i + j] as u128 + (a[i] as u128) * (b[j] as u128) + carry;
            wide[i + j] = cur as u64;
            carry = cur >> 64;
        }
        wide[i + 4] = carry as u64;
    }

    // 2^256 = 38 (mod p)
    let mut out = ZERO;
    let mut carry: u128 = 0;
    for i in 0..4 {
        let cur = wide[i] as u128 + (wide[i + 4] as u128) * 38 + carry;
        out[i] = cur as u64;
        carry = cur >> 64;
    }

    let mut fold = (carry as u64) * 38;
    while fold != 0 {
        let (sum, overflow) = add_raw(&out, &[fold, 0, 0, 0]);
        out = sum;
        fold = if overflow { 38 } else { 0 };
    }

    reduce(out)
}

fn pow(base: &Fe, exp: &Fe) -> Fe {
    let mut acc = ONE;
    for i in (0..4).rev() {
        for bit in (0..64).rev() {
            acc = mul(&acc, &acc);
            if (exp[i] >> bit) & 1 == 1 {
                acc = mul(&acc, base);
            }
        }
    }
    acc
}

fn is_square(a: &Fe) -> bool {
    *a == ZERO || pow(a, &HALF_P_MINUS_ONE) == ONE
}
