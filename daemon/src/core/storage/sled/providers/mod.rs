mod kyc;
mod table;
