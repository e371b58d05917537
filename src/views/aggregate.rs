use std::collections::HashMap;

use crate::data::model::{
    Cell, LayoffRecord, COMPANY, COUNTRY, INDUSTRY, LAID_OFF_COUNT, LOCATION_HQ, STAGE,
};

use super::DerivedView;

// ---------------------------------------------------------------------------
// Group keys
// ---------------------------------------------------------------------------

/// A categorical column a view can group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupColumn {
    Company,
    Industry,
    Country,
    LocationHq,
    Stage,
    /// Calendar year of `Date`.
    Year,
}

impl GroupColumn {
    pub fn name(self) -> &'static str {
        match self {
            GroupColumn::Company => COMPANY,
            GroupColumn::Industry => INDUSTRY,
            GroupColumn::Country => COUNTRY,
            GroupColumn::LocationHq => LOCATION_HQ,
            GroupColumn::Stage => STAGE,
            GroupColumn::Year => "Year",
        }
    }

    /// The record's key cell, or `None` when the label is blank.
    fn key(self, rec: &LayoffRecord) -> Option<Cell> {
        let text = match self {
            GroupColumn::Company => &rec.company,
            GroupColumn::Industry => &rec.industry,
            GroupColumn::Country => &rec.country,
            GroupColumn::LocationHq => &rec.location_hq,
            GroupColumn::Stage => &rec.stage,
            GroupColumn::Year => return Some(Cell::Integer(rec.year() as i64)),
        };
        if text.trim().is_empty() {
            None
        } else {
            Some(Cell::Text(text.clone()))
        }
    }
}

// ---------------------------------------------------------------------------
// Group sums
// ---------------------------------------------------------------------------

/// One group and its summed `Laid_Off_Count`.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSum {
    pub key: Vec<Cell>,
    pub total: f64,
}

/// Sum `Laid_Off_Count` per distinct key.
///
/// Groups come out in order of first appearance. Records with a blank label
/// in any key column belong to no group.
pub fn sum_laid_off<'a>(
    records: impl IntoIterator<Item = &'a LayoffRecord>,
    keys: &[GroupColumn],
) -> Vec<GroupSum> {
    let mut index: HashMap<Vec<Cell>, usize> = HashMap::new();
    let mut groups: Vec<GroupSum> = Vec::new();

    for rec in records {
        let Some(key) = keys.iter().map(|k| k.key(rec)).collect::<Option<Vec<Cell>>>() else {
            continue;
        };
        match index.get(&key) {
            Some(&i) => groups[i].total += rec.laid_off_count,
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(GroupSum {
                    key,
                    total: rec.laid_off_count,
                });
            }
        }
    }
    groups
}

/// Largest total first. The sort is stable, so ties keep appearance order.
pub fn sort_desc(groups: &mut [GroupSum]) {
    groups.sort_by(|a, b| b.total.total_cmp(&a.total));
}

/// Sort descending and keep the first `n` groups.
pub fn top_n(mut groups: Vec<GroupSum>, n: usize) -> Vec<GroupSum> {
    sort_desc(&mut groups);
    groups.truncate(n);
    groups
}

/// Key columns followed by `Laid_Off_Count`.
pub fn to_view(keys: &[GroupColumn], groups: Vec<GroupSum>) -> DerivedView {
    let mut columns: Vec<&str> = keys.iter().map(|k| k.name()).collect();
    columns.push(LAID_OFF_COUNT);
    let rows = groups
        .into_iter()
        .map(|g| {
            let mut row = g.key;
            row.push(Cell::Float(g.total));
            row
        })
        .collect();
    DerivedView::with_rows(&columns, rows)
}

/// Group, sum, sort descending and truncate in one step.
pub fn top_n_view<'a>(
    records: impl IntoIterator<Item = &'a LayoffRecord>,
    keys: &[GroupColumn],
    n: usize,
) -> DerivedView {
    to_view(keys, top_n(sum_laid_off(records, keys), n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(company: &str, country: &str, laid_off: f64) -> LayoffRecord {
        LayoffRecord {
            company: company.into(),
            industry: "Tech".into(),
            country: country.into(),
            location_hq: "Berlin".into(),
            stage: "Seed".into(),
            date: NaiveDate::from_ymd_opt(2022, 3, 4).unwrap(),
            laid_off_count: laid_off,
            funds_raised: 0.0,
            percentage: 0.0,
        }
    }

    #[test]
    fn groups_keep_first_appearance_order() {
        let records = [rec("a", "X", 1.0), rec("b", "Y", 5.0), rec("c", "X", 2.0)];
        let groups = sum_laid_off(&records, &[GroupColumn::Country]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, vec![Cell::text("X")]);
        assert_eq!(groups[0].total, 3.0);
        assert_eq!(groups[1].total, 5.0);
    }

    #[test]
    fn blank_labels_are_left_out() {
        let records = [rec("a", "", 100.0), rec("b", "  ", 100.0), rec("c", "X", 2.0)];
        let groups = sum_laid_off(&records, &[GroupColumn::Country]);
        assert_eq!(groups, vec![GroupSum { key: vec![Cell::text("X")], total: 2.0 }]);
    }

    #[test]
    fn ties_keep_appearance_order_after_sort() {
        let records = [rec("a", "X", 1.0), rec("b", "Y", 7.0), rec("c", "Z", 7.0), rec("d", "W", 7.0)];
        let view = top_n_view(&records, &[GroupColumn::Company], 2);
        assert_eq!(view.texts(COMPANY), ["b", "c"]);
    }

    #[test]
    fn year_key_is_an_integer_column() {
        let records = [rec("a", "X", 1.0)];
        let view = to_view(&[GroupColumn::Year], sum_laid_off(&records, &[GroupColumn::Year]));
        assert_eq!(view.columns, ["Year", LAID_OFF_COUNT]);
        assert_eq!(view.rows[0][0], Cell::Integer(2022));
    }
}
