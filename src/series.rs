use crate::error::TanitaError;
use crate::measurement::{BodyType, Gender, Measurement};
use crate::DT_FORMAT_OUT;
use chrono::NaiveDateTime;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// The numeric fields of a measurement, in the order the device writes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Age,
    Height,
    ActivityLevel,
    Weight,
    Bmi,
    Fat,
    FatRightArm,
    FatLeftArm,
    FatRightLeg,
    FatLeftLeg,
    FatTrunk,
    Muscle,
    MuscleRightArm,
    MuscleLeftArm,
    MuscleRightLeg,
    MuscleLeftLeg,
    MuscleTrunk,
    BoneMass,
    VisceralFat,
    Calories,
    MetabolicAge,
    Water,
}

impl Field {
    pub const ALL: [Field; 22] = [
        Field::Age,
        Field::Height,
        Field::ActivityLevel,
        Field::Weight,
        Field::Bmi,
        Field::Fat,
        Field::FatRightArm,
        Field::FatLeftArm,
        Field::FatRightLeg,
        Field::FatLeftLeg,
        Field::FatTrunk,
        Field::Muscle,
        Field::MuscleRightArm,
        Field::MuscleLeftArm,
        Field::MuscleRightLeg,
        Field::MuscleLeftLeg,
        Field::MuscleTrunk,
        Field::BoneMass,
        Field::VisceralFat,
        Field::Calories,
        Field::MetabolicAge,
        Field::Water,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Age => "age",
            Field::Height => "height",
            Field::ActivityLevel => "activity_level",
            Field::Weight => "weight",
            Field::Bmi => "bmi",
            Field::Fat => "fat",
            Field::FatRightArm => "fat_right_arm",
            Field::FatLeftArm => "fat_left_arm",
            Field::FatRightLeg => "fat_right_leg",
            Field::FatLeftLeg => "fat_left_leg",
            Field::FatTrunk => "fat_trunk",
            Field::Muscle => "muscle",
            Field::MuscleRightArm => "muscle_right_arm",
            Field::MuscleLeftArm => "muscle_left_arm",
            Field::MuscleRightLeg => "muscle_right_leg",
            Field::MuscleLeftLeg => "muscle_left_leg",
            Field::MuscleTrunk => "muscle_trunk",
            Field::BoneMass => "bone_mass",
            Field::VisceralFat => "visceral_fat",
            Field::Calories => "calories",
            Field::MetabolicAge => "metabolic_age",
            Field::Water => "water",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.name() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Column-oriented view of the measurements, one column per field,
/// all columns of equal length and in input order.
#[derive(Debug, Clone)]
pub struct Series {
    pub time: Vec<NaiveDateTime>,
    pub body_type: Vec<BodyType>,
    pub gender: Vec<Gender>,
    values: Vec<Vec<f64>>,
}

impl Series {
    pub fn new(capacity: usize) -> Series {
        let values = Field::ALL
            .iter()
            .map(|_| Vec::with_capacity(capacity))
            .collect();
        Series {
            time: Vec::with_capacity(capacity),
            body_type: Vec::with_capacity(capacity),
            gender: Vec::with_capacity(capacity),
            values,
        }
    }

    pub fn from_measurements(measurements: &[Measurement]) -> Series {
        let mut series = Series::new(measurements.len());
        for m in measurements {
            series.push(m);
        }
        series
    }

    /// appends one measurement to every column
    pub fn push(&mut self, m: &Measurement) {
        self.time.push(m.timestamp);
        self.body_type.push(m.body_type);
        self.gender.push(m.gender);
        for &field in Field::ALL.iter() {
            self.values[field.index()].push(m.value(field));
        }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn get(&self, field: Field) -> &[f64] {
        &self.values[field.index()]
    }

    /// lookup by field name, e.g., "fat_trunk"
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        Field::from_name(name).map(|f| self.get(f))
    }

    /// writes all the columns as a csv at the given path
    pub fn to_csv(&self, fout: &Path) -> Result<(), TanitaError> {
        let io_err = |source| TanitaError::Io {
            path: fout.to_path_buf(),
            source,
        };
        let file = File::create(fout).map_err(io_err)?;
        let mut buf = BufWriter::new(file);
        write!(buf, "{}", self).map_err(io_err)?;
        buf.flush().map_err(io_err)?;
        Ok(())
    }
}

impl std::fmt::Display for Series {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "datetime,body_type,gender")?;
        for field in Field::ALL.iter() {
            write!(f, ",{}", field.name())?;
        }
        writeln!(f)?;
        for i in 0..self.len() {
            write!(
                f,
                "{},{},{}",
                self.time[i].format(DT_FORMAT_OUT),
                self.body_type[i],
                self.gender[i]
            )?;
            for column in self.values.iter() {
                write!(f, ",{}", column[i])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
