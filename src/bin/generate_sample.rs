use std::error::Error;

use serde::Serialize;

const OUTPUT_PATH: &str = "resumen_beneficio_afp.csv";
const N_RECORDS: usize = 500;

/// One synthetic row. Header casing and `sexo` spacing are deliberately
/// untidy so the dashboard's normalization has something to do.
#[derive(Debug, Serialize)]
struct Row {
    #[serde(rename = "Edad")]
    edad: i64,
    #[serde(rename = "Meses_Cotizados")]
    meses_cotizados: i64,
    #[serde(rename = "Sexo")]
    sexo: &'static str,
    #[serde(rename = "Pensionado")]
    pensionado: u8,
    #[serde(rename = "Consultara_Beneficio")]
    consultara_beneficio: u8,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_f64() * (hi - lo + 1) as f64) as i64
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

fn generate_row(rng: &mut SimpleRng) -> Row {
    const SEXES: [&str; 4] = ["F", "M", " f", "m "];

    let edad = rng.range(18, 95);
    // At most twelve months per working year, capped near a full career.
    let max_months = ((edad - 18) * 12).min(540);
    let meses_cotizados = rng.range(0, max_months);
    let sexo = SEXES[rng.range(0, 3) as usize];

    let pensionado = if edad >= 65 { rng.chance(0.9) } else { rng.chance(0.05) };
    let p_benefit = match (pensionado, meses_cotizados) {
        (true, m) if m < 240 => 0.8,
        (true, _) => 0.45,
        (false, _) => 0.1,
    };

    Row {
        edad,
        meses_cotizados,
        sexo,
        pensionado: pensionado as u8,
        consultara_beneficio: rng.chance(p_benefit) as u8,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut rng = SimpleRng::new(42);

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(OUTPUT_PATH)?;
    for _ in 0..N_RECORDS {
        writer.serialize(generate_row(&mut rng))?;
    }
    writer.flush()?;

    println!("Wrote {N_RECORDS} records to {OUTPUT_PATH}");
    Ok(())
}
