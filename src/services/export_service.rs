use crate::error::Result;
use crate::models::user::User;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::*;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const UNPRICED_CELL: &str = "-";

pub struct ExportService;

impl ExportService {
    fn money(amount: Decimal) -> f64 {
        amount.to_f64().unwrap_or_default()
    }

    fn subtitle(records: usize, at: DateTime<Utc>) -> String {
        format!("Exported {} | {} records", at.format("%Y-%m-%d %H:%M UTC"), records)
    }

    /// Styled XLSX workbook mirroring the admin salary table.
    pub fn generate_salaries_xlsx(users: &[User]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Salaries")?;

        let primary_color = Color::RGB(0x1E293B);
        let header_bg = Color::RGB(0x0F172A);
        let alt_row_1 = Color::RGB(0xF8FAFC);
        let alt_row_2 = Color::White;
        let border_color = Color::RGB(0xE2E8F0);
        let priced_color = Color::RGB(0x10B981);
        let unpriced_color = Color::RGB(0x3B82F6);

        let columns = [
            ("#", 6.0),
            ("Name", 28.0),
            ("Email", 32.0),
            ("Local Currency", 16.0),
            ("Salary (EUR)", 16.0),
            ("Commission (EUR)", 18.0),
            ("Displayed Salary (EUR)", 22.0),
            ("Status", 12.0),
            ("Submitted", 18.0),
            ("Last Update", 18.0),
        ];
        let last_col = (columns.len() - 1) as u16;

        for (i, (_, width)) in columns.iter().enumerate() {
            worksheet.set_column_width(i as u16, *width)?;
        }

        let title_format = Format::new()
            .set_font_size(16)
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(primary_color)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);
        worksheet.set_row_height(0, 36)?;
        worksheet.merge_range(0, 0, 0, last_col, "Salary records", &title_format)?;

        let subtitle_format = Format::new()
            .set_font_size(10)
            .set_italic()
            .set_font_color(Color::RGB(0x94A3B8))
            .set_background_color(primary_color)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);
        worksheet.set_row_height(1, 22)?;
        let subtitle = Self::subtitle(users.len(), Utc::now());
        worksheet.merge_range(1, 0, 1, last_col, &subtitle, &subtitle_format)?;

        let header_format = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(Color::White)
            .set_background_color(header_bg)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap()
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);
        let header_row = 2;
        worksheet.set_row_height(header_row, 28)?;
        for (i, (name, _)) in columns.iter().enumerate() {
            worksheet.write_string_with_format(header_row, i as u16, *name, &header_format)?;
        }

        let data_start_row = 3;
        for (idx, user) in users.iter().enumerate() {
            let row = data_start_row + idx as u32;
            let detail = &user.salary_detail;
            let bg = if idx % 2 == 0 { alt_row_1 } else { alt_row_2 };

            let base_fmt = Format::new()
                .set_font_size(10)
                .set_background_color(bg)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(border_color);
            let center_fmt = base_fmt.clone().set_align(FormatAlign::Center);
            let money_fmt = base_fmt.clone().set_num_format("#,##0.00");

            worksheet.set_row_height(row, 20)?;
            worksheet.write_number_with_format(row, 0, (idx + 1) as f64, &center_fmt)?;
            worksheet.write_string_with_format(row, 1, &user.name, &base_fmt.clone().set_bold())?;
            worksheet.write_string_with_format(row, 2, &user.email, &base_fmt)?;
            worksheet.write_number_with_format(
                row,
                3,
                Self::money(detail.salary_local_currency),
                &money_fmt,
            )?;
            match detail.salary_in_euros {
                Some(euros) => {
                    worksheet.write_number_with_format(row, 4, Self::money(euros), &money_fmt)?;
                }
                None => {
                    worksheet.write_string_with_format(row, 4, UNPRICED_CELL, &center_fmt)?;
                }
            }
            worksheet.write_number_with_format(row, 5, Self::money(detail.commission), &money_fmt)?;
            worksheet.write_number_with_format(
                row,
                6,
                Self::money(detail.display_amount()),
                &money_fmt.clone().set_bold(),
            )?;

            let (status, status_color) = if detail.is_priced() {
                ("Priced", priced_color)
            } else {
                ("New", unpriced_color)
            };
            let status_fmt = Format::new()
                .set_font_size(10)
                .set_bold()
                .set_font_color(Color::White)
                .set_background_color(status_color)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(border_color);
            worksheet.write_string_with_format(row, 7, status, &status_fmt)?;

            let submitted = user.created_at.format("%Y-%m-%d %H:%M").to_string();
            worksheet.write_string_with_format(row, 8, &submitted, &center_fmt)?;
            let updated = detail.updated_at.format("%Y-%m-%d %H:%M").to_string();
            worksheet.write_string_with_format(row, 9, &updated, &center_fmt)?;
        }

        let total_row = data_start_row + users.len() as u32 + 1;
        let summary_fmt = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(primary_color)
            .set_background_color(Color::RGB(0xE0E7FF))
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);

        let priced = users.iter().filter(|u| u.salary_detail.is_priced()).count();
        let payroll: Decimal = users
            .iter()
            .filter_map(|u| u.salary_detail.displayed_salary)
            .sum();

        worksheet.set_row_height(total_row, 24)?;
        worksheet.merge_range(
            total_row,
            0,
            total_row,
            2,
            &format!("Total: {} records", users.len()),
            &summary_fmt,
        )?;
        worksheet.merge_range(
            total_row,
            3,
            total_row,
            5,
            &format!("Priced: {} | Awaiting price: {}", priced, users.len() - priced),
            &summary_fmt,
        )?;
        worksheet.merge_range(
            total_row,
            6,
            total_row,
            last_col,
            &format!("Priced payroll: EUR {:.2}", payroll),
            &summary_fmt,
        )?;

        worksheet.set_freeze_panes(3, 0)?;
        worksheet.autofilter(
            header_row,
            0,
            (data_start_row + users.len() as u32).saturating_sub(1).max(header_row),
            last_col,
        )?;

        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }
}
