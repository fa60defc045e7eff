use crate::errors::ServerError;
use crate::responses::xlsx_response;
use crate::responses::ResultResp;
use crate::scraper::ListingRecord;
use rust_xlsxwriter::{Format, Workbook};

pub fn listings_workbook(listings: &[ListingRecord]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    for (col, header) in ["Model", "Year", "Price (Rs.)"].iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    for (i, listing) in listings.iter().enumerate() {
        let r = (i + 1) as u32;

        worksheet
            .write_string(r, 0, &listing.title)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write title: {}", e)))?;

        // Unknown years stay blank rather than showing 0.
        if listing.year > 0 {
            worksheet
                .write_number(r, 1, listing.year as f64)
                .map_err(|e| ServerError::XlsxError(format!("Failed to write year: {}", e)))?;
        }

        worksheet
            .write_number(r, 2, listing.price as f64)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write price: {}", e)))?;
    }

    worksheet.autofit();

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {}", e)))
}

pub fn export_listings_xlsx(listings: &[ListingRecord], query: &str) -> ResultResp {
    let buffer = listings_workbook(listings)?;
    let safe: String = query
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    xlsx_response(buffer, &format!("listings_{safe}.xlsx"))
}
