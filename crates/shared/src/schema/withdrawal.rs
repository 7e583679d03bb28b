use sea_query::Iden;

#[derive(Debug, Iden)]
pub enum Withdrawals {
    Table,
    Id,
    PhoneNumber,
    BankName,
    Amount,
    Status,
    CreatedAt,
    ProcessedAt,
}
